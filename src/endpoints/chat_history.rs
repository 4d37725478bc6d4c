use serde_json::Value;

use crate::api::{EmChat, Result, Transport};

impl<T: Transport> EmChat<T> {
    /// Queries exported chat history.
    ///
    /// `ql` is a filter expression such as
    /// `select * where timestamp>1403143434443 order by timestamp desc`.
    /// Write it with real spaces: we form-encode it ourselves, so a `+`
    /// meant as a space would reach the server as a literal plus sign.
    /// Pass the `cursor` from a previous response to fetch the next page.
    pub async fn get_chat_messages(
        &self,
        ql: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Value> {
        let mut query = vec![("ql", ql.to_string()), ("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        self.get_with_query(&["chatmessages"], &query).await
    }
}
