use std::sync::Arc;
use tokio::sync::Mutex;

use chart_url::{LiveChart, MemoryLocation, UrlBinder};

#[derive(Clone)]
pub struct AppState {
    pub chart: Arc<LiveChart>,
    // The address bar this host writes chart params into
    pub location: Arc<MemoryLocation>,
    pub binder: Arc<Mutex<UrlBinder>>,
}

impl AppState {
    pub fn new(chart: LiveChart, location: MemoryLocation, binder: UrlBinder) -> Self {
        Self {
            chart: Arc::new(chart),
            location: Arc::new(location),
            binder: Arc::new(Mutex::new(binder)),
        }
    }

    pub async fn bind(&self) -> chart_url::Result<()> {
        self.binder
            .lock()
            .await
            .bind_to_window(self.chart.clone(), self.location.clone())
    }
}
