pub mod active;
pub mod churn;
pub mod coerce;
pub mod dashboard;
pub mod engagement;
pub mod interval;
pub mod month;
pub mod mrr;
pub mod quality;
pub mod ratio;
pub mod silver;
pub mod timeline;

pub use active::{ActiveCustomersMonthly, build_active_customers_monthly};
pub use churn::{ChurnMonthly, build_customer_churn_monthly};
pub use dashboard::{DashboardRow, DashboardSummary, assemble_dashboard, summarize_dashboard};
pub use engagement::{DauMauMonthly, UsageActivity, build_dau_mau_monthly};
pub use interval::{ActivityInterval, MonthlyActivity, expand_monthly};
pub use mrr::{MrrMonthly, build_mrr_monthly};
pub use quality::{AuditRecord, QualityRule, RejectedRow};
pub use timeline::CustomerTimelines;
