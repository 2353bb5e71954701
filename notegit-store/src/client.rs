//! HTTP client for the Joplin Data API.
//!
//! The API serves `GET /folders` and `GET /notes` with a `fields` projection,
//! a `token` query parameter, and cursor pagination on notes (`page` starting
//! at 1, `has_more` in the response envelope).

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use notegit_core::{Note, Notebook, NoteId, NotebookId};

use crate::error::StoreError;
use crate::NoteStore;

const NOTEBOOK_FIELDS: &str = "id,title,parent_id";
const NOTE_FIELDS: &str = "id,title,body,parent_id,updated_time";

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// Response envelope shared by the listing endpoints.
#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct NotebookItem {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    parent_id: String,
}

#[derive(Debug, Deserialize)]
struct NoteItem {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    parent_id: String,
    /// Milliseconds since the Unix epoch, as the host reports it.
    #[serde(default)]
    updated_time: Option<i64>,
}

impl From<NotebookItem> for Notebook {
    fn from(item: NotebookItem) -> Self {
        Notebook {
            id: NotebookId::from(item.id),
            title: item.title,
            parent_id: NotebookId::from(item.parent_id),
        }
    }
}

impl From<NoteItem> for Note {
    fn from(item: NoteItem) -> Self {
        Note {
            id: NoteId::from(item.id),
            title: item.title,
            body: item.body,
            parent_id: NotebookId::from(item.parent_id),
            updated_time: item.updated_time.and_then(epoch_millis_to_datetime),
        }
    }
}

fn epoch_millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`NoteStore`] implementation over the Joplin Data API.
pub struct JoplinClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl JoplinClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            agent: ureq::agent(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn get_page<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &'static str,
        fields: &str,
        page: u32,
    ) -> Result<Page<T>, StoreError> {
        let url = format!("{}/{endpoint}", self.base_url);
        self.agent
            .get(&url)
            .query("token", &self.token)
            .query("fields", fields)
            .query("page", &page.to_string())
            .call()?
            .into_json()
            .map_err(|source| StoreError::Decode { endpoint, source })
    }
}

impl NoteStore for JoplinClient {
    fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError> {
        let page: Page<NotebookItem> = self.get_page("folders", NOTEBOOK_FIELDS, 1)?;
        Ok(page.items.into_iter().map(Notebook::from).collect())
    }

    fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        accumulate_pages(|page| self.get_page::<NoteItem>("notes", NOTE_FIELDS, page))
    }
}

/// Drive the host's page cursor to exhaustion, accumulating every item in
/// host order.
fn accumulate_pages<F>(mut fetch: F) -> Result<Vec<Note>, StoreError>
where
    F: FnMut(u32) -> Result<Page<NoteItem>, StoreError>,
{
    let mut all = Vec::new();
    let mut page = 1;
    loop {
        let response = fetch(page)?;
        let has_more = response.has_more;
        all.extend(response.items.into_iter().map(Note::from));
        if !has_more {
            break;
        }
        page += 1;
    }
    tracing::debug!(notes = all.len(), pages = page, "fetched note listing");
    Ok(all)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
