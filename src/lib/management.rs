use crate::database_drivers::{ConnectionTarget, Credentials, DatabaseDriver};
use crate::error::Result;
use log::info;

pub async fn create(
    database: &dyn DatabaseDriver,
    target: &ConnectionTarget,
    credentials: &Credentials,
) -> Result<()> {
    info!(
        "Creating {} database {}",
        database.engine().as_str(),
        target.database_name
    );

    database.create_database(target, credentials).await?;

    Ok(())
}

pub async fn drop(
    database: &dyn DatabaseDriver,
    target: &ConnectionTarget,
    credentials: &Credentials,
) -> Result<()> {
    info!(
        "Dropping {} database {}",
        database.engine().as_str(),
        target.database_name
    );

    database.drop_database(target, credentials).await?;

    Ok(())
}
