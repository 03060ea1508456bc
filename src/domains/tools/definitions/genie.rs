//! Genie (natural-language data Q&A) tools.

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "genie";

const DESCRIPTION: &str = "Ask questions about data in natural language through Genie spaces";

const USE_CASES: &[&str] = &[
    "ask a question about data in plain english",
    "natural language to sql",
    "continue a genie conversation",
    "fetch the result of a generated query",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::post("databricks_genie_start_conversation", "/api/2.0/genie/spaces/{space_id}/start-conversation")
                .describe("Ask the first question of a new conversation in a Genie space. The answer is produced asynchronously; poll databricks_genie_get_message.")
                .param(Param::string("space_id", "Genie space id"))
                .param(Param::string("content", "Question"))
                .acknowledge("Conversation {conversation_id} started, message {message_id} is being processed. Poll databricks_genie_get_message for the answer.")
                .started(),
            RestOperation::post("databricks_genie_create_message", "/api/2.0/genie/spaces/{space_id}/conversations/{conversation_id}/messages")
                .describe("Ask a follow-up question in an existing conversation.")
                .param(Param::string("space_id", "Genie space id"))
                .param(Param::string("conversation_id", "Conversation id"))
                .param(Param::string("content", "Question"))
                .acknowledge("Message {id} sent to conversation {conversation_id}. Poll databricks_genie_get_message for the answer.")
                .started(),
            RestOperation::get("databricks_genie_get_message", "/api/2.0/genie/spaces/{space_id}/conversations/{conversation_id}/messages/{message_id}")
                .describe("Get a message: status, generated SQL and text attachments.")
                .param(Param::string("space_id", "Genie space id"))
                .param(Param::string("conversation_id", "Conversation id"))
                .param(Param::string("message_id", "Message id")),
            RestOperation::get("databricks_genie_get_message_query_result", "/api/2.0/genie/spaces/{space_id}/conversations/{conversation_id}/messages/{message_id}/query-result")
                .describe("Get the result of the SQL generated for a message.")
                .param(Param::string("space_id", "Genie space id"))
                .param(Param::string("conversation_id", "Conversation id"))
                .param(Param::string("message_id", "Message id")),
            RestOperation::post("databricks_genie_execute_message_query", "/api/2.0/genie/spaces/{space_id}/conversations/{conversation_id}/messages/{message_id}/execute-query")
                .describe("Re-run the SQL generated for a message.")
                .param(Param::string("space_id", "Genie space id"))
                .param(Param::string("conversation_id", "Conversation id"))
                .param(Param::string("message_id", "Message id")),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;
    use serde_json::json;

    const CONVERSATION: &str = "/api/2.0/genie/spaces/{space_id}/conversations/{conversation_id}";

    #[test]
    fn test_message_paths_share_conversation_prefix() {
        let (_, calls) = call(
            module(),
            "databricks_genie_get_message",
            json!({"space_id": "s1", "conversation_id": "c1", "message_id": "m1"}),
        );
        let prefix = CONVERSATION
            .replace("{space_id}", "s1")
            .replace("{conversation_id}", "c1");
        assert_eq!(calls[0].path, format!("{}/messages/m1", prefix));
    }
}
