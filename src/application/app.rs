use crate::application::tui::{CalendarView, Theme};
use crate::application::{BookingFlow, BookingStore, Config};
use crate::domain::{BackOffice, PromoCatalog};
use crate::infrastructure::{FileSessionCache, HookRegistry, SimulatedGateway};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::info;
use std::sync::Arc;

pub struct BookingApp {
    config: Config,
    store: BookingStore,
    flow: BookingFlow,
    office: BackOffice,
    today: NaiveDate,
}

impl BookingApp {
    pub fn new(config: Config) -> Result<Self> {
        let hooks = HookRegistry::with_defaults();
        let cache = Arc::new(FileSessionCache::new(config.session_dir()));
        let store = BookingStore::open(config.session.clone(), cache, hooks)
            .with_context(|| format!("failed to open session {}", config.session))?;

        let office = BackOffice::sample();
        let flow = BookingFlow::new(
            PromoCatalog::standard(),
            office.availability(),
            config.base_price,
        );
        info!(
            "session {} opened from {}",
            config.session,
            config.session_dir().display()
        );

        Ok(Self {
            config,
            store,
            flow,
            office,
            today: Local::now().date_naive(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub fn flow(&self) -> &BookingFlow {
        &self.flow
    }

    pub fn office(&self) -> &BackOffice {
        &self.office
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Flow and store together, for steps that change the draft.
    pub fn parts_mut(&mut self) -> (&BookingFlow, &mut BookingStore) {
        (&self.flow, &mut self.store)
    }

    pub fn gateway(&self) -> SimulatedGateway {
        SimulatedGateway::new(self.config.submit_delay)
    }

    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.config.theme)
    }

    /// Interactive month calendar, starting at `date` or the first selected
    /// day.
    pub fn run_calendar(&mut self, date: Option<NaiveDate>) -> Result<()> {
        let initial = date
            .or_else(|| self.store.draft().selected_dates.first())
            .unwrap_or(self.today);
        let theme = self.theme();

        let mut view = CalendarView::new(initial, self.today, theme, &self.flow, &mut self.store)?;
        view.run()
    }
}
