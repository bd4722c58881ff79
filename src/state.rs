use crate::{
    config::RuntimeConfiguration,
    error::{GetDatabaseConnectionSnafu, MigrateSnafu, OpenDatabaseSnafu, RosterResult},
    maud_conveniences::render_nav,
};
use maud::{DOCTYPE, Markup, html};
use snafu::ResultExt;
use sqlx::{Pool, Sqlite, pool::PoolConnection};
use std::ops::Deref;

#[derive(Clone, Debug)]
pub struct RosterState {
    pool: Pool<Sqlite>,
    config: RuntimeConfiguration,
}

impl RosterState {
    pub async fn new(config: RuntimeConfiguration) -> RosterResult<Self> {
        let db_config = config.db_config();
        let pool = db_config
            .pool_options()
            .connect_with(db_config.connect_options()?)
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool, config })
    }

    #[cfg(test)]
    pub async fn in_memory() -> Self {
        Self::new(RuntimeConfiguration::in_memory())
            .await
            .expect("unable to open in-memory database")
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    /// Wraps page content in the shared layout. `page_id` tells the page script which view it is driving.
    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, page_title: &str, page_id: &str, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    script src="/static/script.js" defer {}
                    title { "Roster - " (page_title) }
                }
                body data-page=(page_id) class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (render_nav(page_id))
                    (markup)
                    div id="toast-container" class="fixed bottom-4 right-4 flex flex-col space-y-2" {}
                }
            }
        }
    }

    pub async fn get_connection(&self) -> RosterResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }

    pub async fn sensible_shutdown(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

impl Deref for RosterState {
    type Target = Pool<Sqlite>;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}
