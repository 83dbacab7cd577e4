//! Recorder handler for unit tests

use std::sync::{Arc, Mutex};

use contracts::{Attr, Context, HandlerError, Level, LogHandler, Record, SharedHandler};

/// What a recorder observed for one dispatched record
#[derive(Debug, Clone)]
pub struct Seen {
    pub recorder: String,
    pub groups: Vec<String>,
    pub attrs: Vec<Attr>,
    pub record: Record,
}

pub type Journal = Arc<Mutex<Vec<Seen>>>;

/// Leaf handler that records everything it is given
#[derive(Clone)]
pub struct Recorder {
    pub name: String,
    pub min: Level,
    pub fail: Option<HandlerError>,
    pub groups: Vec<String>,
    pub attrs: Vec<Attr>,
    pub journal: Journal,
}

impl Recorder {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            min: Level::DEBUG,
            fail: None,
            groups: Vec::new(),
            attrs: Vec::new(),
            journal: Arc::clone(journal),
        }
    }

    pub fn min_level(mut self, level: Level) -> Self {
        self.min = level;
        self
    }

    pub fn failing(mut self, error: HandlerError) -> Self {
        self.fail = Some(error);
        self
    }

    pub fn shared(self) -> SharedHandler {
        Arc::new(self)
    }
}

impl LogHandler for Recorder {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.min
    }

    fn handle(&self, _ctx: &Context, mut record: Record) -> Result<(), HandlerError> {
        // Mutate the owned record so a shared copy would be noticed downstream.
        record.add_attrs([Attr::new("seen_by", self.name.clone())]);
        self.journal.lock().unwrap().push(Seen {
            recorder: self.name.clone(),
            groups: self.groups.clone(),
            attrs: self.attrs.clone(),
            record,
        });
        match &self.fail {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        let mut next = self.clone();
        next.attrs.extend(attrs);
        Arc::new(next)
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        let mut next = self.clone();
        next.groups.push(name.to_string());
        Arc::new(next)
    }
}

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn seen_by(journal: &Journal) -> Vec<String> {
    journal
        .lock()
        .unwrap()
        .iter()
        .map(|s| s.recorder.clone())
        .collect()
}
