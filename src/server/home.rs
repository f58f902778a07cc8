//! Status page shown at the root path.

use axum::response::Html;

use crate::secret::week::WeekId;

/// Root handler.
///
/// Returns a small HTML page confirming the service is running and naming
/// the current week, so approvers can tell whether their secret is still
/// the active one.
pub async fn home_handler() -> Html<String> {
    let week = WeekId::current();

    Html(format!(
        "<h1>PR Approver</h1>\n\
         <p>Status: <strong>Running</strong></p>\n\
         <p>Current week: {week}</p>\n\
         <p>POST to /approve with a pull request URL and this week's secret.</p>\n"
    ))
}
