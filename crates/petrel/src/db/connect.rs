use petrel_core::{driver::Connection, Error, Result};

use url::Url;

/// Open a connection with the driver named by the URL scheme.
pub(super) fn connect(url: &str) -> Result<Box<dyn Connection>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Connection>> {
    let driver = petrel_driver_sqlite::Sqlite::new(url)?;
    Ok(Box::new(driver.connect()?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Connection>> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}
