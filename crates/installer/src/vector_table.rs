//! Vector-store table initialization.
//!
//! The table variant of the bootstrap: after the extension is ensured,
//! create the embeddings table the vector store will write into. The DDL
//! is idempotent, so re-running a bootstrap after a partial failure is
//! safe here too.

use crate::error::{InstallError, InstallResult};
use crate::extension::{ExtensionInstaller, validate_identifier};
use sqlx::Connection;

/// pgvector's column dimension limit.
const MAX_DIMENSIONS: u16 = 16000;

impl ExtensionInstaller {
    /// Create the embeddings table if it does not exist.
    ///
    /// Callers must have run [`ExtensionInstaller::install_or_upgrade`]
    /// first; the `vector(N)` column type does not exist otherwise.
    pub async fn ensure_vector_table(
        &mut self,
        table: &str,
        dimensions: u16,
    ) -> InstallResult<()> {
        validate_identifier(table)?;
        if dimensions == 0 || dimensions > MAX_DIMENSIONS {
            return Err(InstallError::InvalidDimensions(dimensions));
        }

        let sql = vector_table_sql(table, dimensions);
        let mut tx = self.connection().begin().await?;
        if let Err(err) = sqlx::query(&sql).execute(&mut *tx).await {
            tracing::error!(table, dimensions, error = %err, "Vector table creation failed");
            let _ = tx.rollback().await;
            return Err(err.into());
        }
        tx.commit().await?;

        tracing::info!(table, dimensions, "Vector table ensured");
        Ok(())
    }
}

fn vector_table_sql(table: &str, dimensions: u16) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS "{table}" (
    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
    content text NOT NULL,
    embedding vector({dimensions}) NOT NULL,
    metadata jsonb NOT NULL DEFAULT '{{}}'::jsonb
);
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sql_embeds_dimensions() {
        let sql = vector_table_sql("embeddings", 1536);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS \"embeddings\""));
        assert!(sql.contains("embedding vector(1536) NOT NULL"));
    }
}
