use time::Date;

use super::*;

impl RemoteClient {
    pub async fn raw_webhook_logs(&self, day: Option<Date>) -> Result<Vec<RawLogRecord>, ApiError> {
        let mut req = self.request(reqwest::Method::GET, "/api/webhook_logs");
        if let Some(day) = day {
            req = req.query(&[("day", day_param(day))]);
        }
        self.send_json(req, "fetch logs").await
    }

    pub async fn webhook_logs(&self, day: Option<Date>) -> Result<Vec<LogEntry>, ApiError> {
        let raw = self.raw_webhook_logs(day).await?;
        Ok(raw.into_iter().map(RawLogRecord::into_entry).collect())
    }

    pub async fn stats(&self) -> Result<StatsSnapshot, ApiError> {
        let req = self.request(reqwest::Method::GET, "/api/stats");
        self.send_json(req, "fetch stats").await
    }
}

/// `YYYY-MM-DD`.
pub(super) fn day_param(day: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        day.year(),
        u8::from(day.month()),
        day.day()
    )
}
