use chrono::NaiveDate;
use models::report::ReportPeriod;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailyReportQuery {
    /// `YYYY-MM-DD`, today (UTC) when absent
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodReportQuery {
    pub period: ReportPeriod,
}
