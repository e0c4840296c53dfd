use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const NOTICE_CAPACITY: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Error,
}

/// A user-facing message about the outcome of an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub ts: String,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Vec<Notice>,
}

fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

impl NoticeLog {
    fn push_entry(&mut self, kind: NoticeKind, message: String) {
        self.entries.push(Notice {
            ts: now_ts(),
            kind,
            message,
        });
        if self.entries.len() > NOTICE_CAPACITY {
            let excess = self.entries.len() - NOTICE_CAPACITY;
            self.entries.drain(..excess);
        }
    }

    pub(crate) fn push_info(&mut self, message: impl Into<String>) {
        self.push_entry(NoticeKind::Info, message.into());
    }

    pub(crate) fn push_error(&mut self, message: impl Into<String>) {
        self.push_entry(NoticeKind::Error, message.into());
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter().filter(|n| n.kind == NoticeKind::Error)
    }

    pub fn last(&self) -> Option<&Notice> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
