use std::time::Duration;

use thirtyfour::components::SelectElement;
use thirtyfour::prelude::*;
use tokio::runtime::Runtime;

use super::portal::{PortalField, PortalGateway, PortalOperationError};
use crate::config::PortalConfig;

/// Thin wrapper around the thirtyfour WebDriver client allowing the
/// synchronous batch workflow to drive the portal without exposing async
/// details.
///
/// Settling is a fixed delay: the portal re-renders asynchronously after each
/// interaction and exposes no readiness signal to wait on.
pub struct WebDriverPortal {
    driver: WebDriver,
    runtime: Runtime,
    portal_url: String,
    settle: Duration,
}

impl WebDriverPortal {
    /// Establishes the WebDriver session. Failure here is fatal for the whole
    /// run; no rows are processed without a session.
    pub fn connect(config: &PortalConfig) -> Result<Self, PortalOperationError> {
        let runtime =
            Runtime::new().map_err(|err| PortalOperationError::Runtime(err.to_string()))?;

        let caps = DesiredCapabilities::chrome();
        let driver = runtime
            .block_on(WebDriver::new(&config.webdriver_url, caps))
            .map_err(Self::map_error)?;

        Ok(Self {
            driver,
            runtime,
            portal_url: config.portal_url.clone(),
            settle: Duration::from_millis(config.settle_delay_ms),
        })
    }

    fn map_error<E: std::fmt::Display>(err: E) -> PortalOperationError {
        PortalOperationError::Backend(err.to_string())
    }
}

impl std::fmt::Debug for WebDriverPortal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriverPortal")
            .field("portal_url", &self.portal_url)
            .finish_non_exhaustive()
    }
}

impl PortalGateway for WebDriverPortal {
    fn open_portal(&self) -> Result<(), PortalOperationError> {
        self.runtime
            .block_on(self.driver.goto(&self.portal_url))
            .map_err(Self::map_error)
    }

    fn fill_field(&self, field: PortalField, value: &str) -> Result<(), PortalOperationError> {
        self.runtime
            .block_on(async {
                let element = self.driver.find(By::Id(field.element_id())).await?;
                element.clear().await?;
                element.send_keys(value).await
            })
            .map_err(Self::map_error)
    }

    fn select_option(&self, field: PortalField, label: &str) -> Result<(), PortalOperationError> {
        self.runtime
            .block_on(async {
                let element = self.driver.find(By::Id(field.element_id())).await?;
                let dropdown = SelectElement::new(&element).await?;
                dropdown.select_by_exact_text(label).await
            })
            .map_err(Self::map_error)
    }

    fn press_submit(&self) -> Result<(), PortalOperationError> {
        self.runtime
            .block_on(async {
                let button = self.driver.find(By::Css("button")).await?;
                button.click().await
            })
            .map_err(Self::map_error)
    }

    fn wait_until_settled(&self) -> Result<(), PortalOperationError> {
        std::thread::sleep(self.settle);
        Ok(())
    }

    fn close_portal(&self) -> Result<(), PortalOperationError> {
        self.runtime
            .block_on(self.driver.clone().quit())
            .map_err(Self::map_error)
    }
}
