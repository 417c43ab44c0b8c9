//! Directory and tag API operations
//!
//! The directory API carries user attributes the content API does not
//! (email, title, department, external ID, role) and is the only place tag
//! expert designations can be resolved.

use crate::client::pagination::fetch_all_pages;
use crate::client::{ApiSession, ApiVersion, ClientResult};
use crate::{DirectoryUser, Tag, TagExperts};

/// Directory/tag API client, borrowing the shared session.
pub struct V3Client<'a> {
    session: &'a ApiSession,
}

impl<'a> V3Client<'a> {
    /// Wrap a connected session
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    /// Fetch the complete user directory.
    pub async fn get_all_users(&self) -> ClientResult<Vec<DirectoryUser>> {
        let url = self.session.v3_url("/users");
        fetch_all_pages(self.session, ApiVersion::V3, &url, &[]).await
    }

    /// Fetch one directory record.
    ///
    /// Deactivated accounts drop out of the directory listing and only
    /// resolve through this individual lookup. Failures are recoverable;
    /// the user collector substitutes defaults.
    pub async fn get_user(&self, user_id: u64) -> ClientResult<DirectoryUser> {
        let url = self.session.v3_url(&format!("/users/{user_id}"));
        self.session.get_json(ApiVersion::V3, &url).await
    }

    /// Fetch all tags. Expert lists come back empty here; they are resolved
    /// per tag via [`V3Client::get_tag_experts`].
    pub async fn get_all_tags(&self) -> ClientResult<Vec<Tag>> {
        let url = self.session.v3_url("/tags");
        fetch_all_pages(self.session, ApiVersion::V3, &url, &[]).await
    }

    /// Fetch the expert lists for one tag. Failures are recoverable; the
    /// tag collector assigns an empty expert set.
    pub async fn get_tag_experts(&self, tag_id: u64) -> ClientResult<TagExperts> {
        let url = self
            .session
            .v3_url(&format!("/tags/{tag_id}/subject-matter-experts"));
        self.session.get_json(ApiVersion::V3, &url).await
    }
}
