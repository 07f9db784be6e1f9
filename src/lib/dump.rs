use crate::database_drivers::{DatabaseDriver, DumpRequest};
use crate::error::{Error, Result};
use log::info;
use std::fs;

pub async fn dump(database: &dyn DatabaseDriver, request: &DumpRequest) -> Result<()> {
    if let Some(parent) = request.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::OutputPath {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    info!(
        "Dumping {} database {} to {}",
        database.engine().as_str(),
        request.target.database_name,
        request.output.display()
    );

    database.dump_database(request).await?;

    Ok(())
}
