//!
//! Listing and deleting Tempo work logs.
//!
//! These are the only operations Tempo exposes on its top level
//! `worklogs/` collection; fetching and creating a single entry goes
//! through [`WorklogResource`](crate::models::WorklogResource) on
//! [`TempoWorklog`].
use log::{debug, warn};

use crate::models::{tempo::TempoWorklog, WorklogResource};
use crate::{fields, JiraError, RestClient, RestError, Result};

/// Retrieves every work log the given user recorded within the date
/// range.
///
/// `date_from` and `date_to` are passed through verbatim as query
/// parameters; their format is the caller's responsibility. The response
/// order is preserved.
#[allow(clippy::missing_errors_doc)]
pub fn list_worklogs(
    client: &dyn RestClient,
    date_from: &str,
    date_to: &str,
    username: &str,
) -> Result<Vec<TempoWorklog>> {
    let path = format!("{}worklogs/", client.config().tempo_base());
    let params = [
        ("username", username),
        ("dateFrom", date_from),
        ("dateTo", date_to),
    ];
    let context = || format!("failed to retrieve work logs for user {username}");

    let uri = client
        .build_uri(&path, &params)
        .map_err(|e| JiraError::transport(context(), e))?;
    debug!("listing tempo work logs from {uri}");
    let json = client
        .get(&uri)
        .map_err(|e| JiraError::transport(context(), e))?;

    if !json.is_array() {
        return Err(JiraError::MalformedPayload("a JSON array of work logs"));
    }
    fields::get_resource_array(Some(&json), TempoWorklog::from_json)
}

/// Deletes a Tempo work log, best effort.
///
/// Unlike retrieval and creation, failures here do not propagate: any
/// error is logged and reported as `false`, so callers can treat deletion
/// as cleanup.
#[must_use]
pub fn delete_worklog(client: &dyn RestClient, id: i64) -> bool {
    match try_delete(client, id) {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to delete work log with id {id}: {e}");
            false
        }
    }
}

fn try_delete(client: &dyn RestClient, id: i64) -> std::result::Result<(), RestError> {
    let path = format!("{}worklogs/{id}", client.config().tempo_base());
    let uri = client.build_uri(&path, &[])?;
    client.delete(&uri)
}
