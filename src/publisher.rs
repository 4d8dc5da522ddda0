//! Periodic template publishing: the web and realtime render cycles.

use crate::configuration::Configuration;
use crate::recent_store::{RecentSample, RecentStore};
use crate::render_context::RenderContext;
use crate::snow_diary::SnowDiary;
use crate::station_state::{SharedStation, StationData};
use crate::tag_registry::TagRegistry;
use crate::template_renderer::TemplateRenderer;
use anyhow::Result;
use chrono::Local;
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct Publisher {
    config: Arc<Configuration>,
    renderer: TemplateRenderer,
    station: SharedStation,
    recent: Arc<RwLock<RecentStore>>,
    diary: Arc<SnowDiary>,
}

impl Publisher {
    pub fn new(config: Arc<Configuration>) -> Result<Self> {
        let registry = TagRegistry::new();
        if config.list_web_tags() {
            registry.write_tag_list(config.web_tag_file())?;
            info!(
                "wrote {} webtag names to {}",
                registry.len(),
                config.web_tag_file().display()
            );
        }

        let station = match StationData::new_from_file(config.state_file()) {
            Ok(data) => data,
            Err(e) => {
                warn!("no station state yet ({e}), starting empty");
                StationData::default()
            }
        };
        let diary = match config.snow_diary_file() {
            Some(path) => match SnowDiary::new_from_file(path) {
                Ok(diary) => diary,
                Err(e) => {
                    warn!("snow diary unavailable ({e}), snow tags read zero");
                    SnowDiary::new()
                }
            },
            None => SnowDiary::new(),
        };

        Ok(Self {
            config,
            renderer: TemplateRenderer::new(registry),
            station: Arc::new(RwLock::new(station)),
            recent: Arc::new(RwLock::new(RecentStore::new())),
            diary: Arc::new(diary),
        })
    }

    /// Run both render cycles until the process is stopped.
    pub async fn run(&self) -> Result<()> {
        let mut web = tokio::time::interval(std::time::Duration::from_secs(
            self.config.web_interval_secs(),
        ));
        let mut realtime = tokio::time::interval(std::time::Duration::from_secs(
            self.config.realtime_interval_secs(),
        ));
        info!(
            "publisher started: {} template(s), web every {}s, realtime every {}s",
            self.config.templates().len(),
            self.config.web_interval_secs(),
            self.config.realtime_interval_secs()
        );
        loop {
            tokio::select! {
                _ = web.tick() => self.web_cycle().await,
                _ = realtime.tick() => self.realtime_cycle().await,
            }
        }
    }

    /// Re-read the station driver's state file; a malformed or missing file
    /// keeps the previous snapshot.
    async fn reload_state(&self) {
        match StationData::new_from_file(self.config.state_file()) {
            Ok(data) => *self.station.write().await = data,
            Err(e) => warn!("keeping previous station state: {e}"),
        }
    }

    pub async fn web_cycle(&self) {
        self.reload_state().await;
        let station = self.station.read().await.clone();
        let recent = self.recent.read().await;
        let ctx = RenderContext {
            config: self.config.as_ref(),
            station: &station,
            recent: &*recent,
            diary: self.diary.as_ref(),
            now: Local::now().naive_local(),
        };
        for job in self.config.templates() {
            self.render_job(&job.source, &job.output, &ctx);
        }
    }

    pub async fn realtime_cycle(&self) {
        self.reload_state().await;
        let station = self.station.read().await.clone();
        let now = Local::now().naive_local();
        {
            let mut recent = self.recent.write().await;
            recent.add(RecentSample::new_from_current(&station.current, now));
            recent.prune(now);
        }
        if let Some(job) = self.config.realtime_template() {
            let recent = self.recent.read().await;
            let ctx = RenderContext {
                config: self.config.as_ref(),
                station: &station,
                recent: &*recent,
                diary: self.diary.as_ref(),
                now,
            };
            self.render_job(&job.source, &job.output, &ctx);
        }
    }

    /// One-shot render against the current state, for the CLI.
    pub async fn render_to_string<P: AsRef<Path>>(&self, template: P) -> Result<String> {
        let station = self.station.read().await.clone();
        let recent = self.recent.read().await;
        let ctx = RenderContext {
            config: self.config.as_ref(),
            station: &station,
            recent: &*recent,
            diary: self.diary.as_ref(),
            now: Local::now().naive_local(),
        };
        self.renderer.render_file(template, &ctx)
    }

    fn render_job(&self, source: &Path, output: &Path, ctx: &RenderContext) {
        match self.renderer.render_file(source, ctx) {
            Ok(text) => {
                if let Err(e) = std::fs::write(output, text) {
                    error!("cannot write {}: {e}", output.display());
                }
            }
            Err(e) => warn!("skipping template {}: {e}", source.display()),
        }
    }
}
