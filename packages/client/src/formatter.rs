//! Message formatting utilities for client display.

use irori_server::infrastructure::dto::websocket::{NoticeType, ServerEvent};
use irori_shared::time::timestamp_to_jst_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one server event received at `received_at` (Unix millis)
    pub fn format_server_event(event: &ServerEvent, own_nick: &str, received_at: i64) -> String {
        match event {
            ServerEvent::ChatMsg(notice) => {
                Self::format_notice(&notice.message, notice.r#type, received_at)
            }
            ServerEvent::Nick(payload) => format!("\n* you are '{}'\n", payload.nick),
            ServerEvent::Users(payload) => Self::format_users(&payload.users, own_nick),
        }
    }

    /// Format a chat line or system notice
    ///
    /// Private messages and errors are marked so that they stand out.
    pub fn format_notice(message: &str, r#type: NoticeType, received_at: i64) -> String {
        let time = timestamp_to_jst_rfc3339(received_at);
        match r#type {
            NoticeType::PvtMsg => format!("\n[{}] (private) {}\n", time, message),
            NoticeType::Error => format!("\n[{}] !! {}\n", time, message),
            _ => format!("\n[{}] {}\n", time, message),
        }
    }

    /// Format the roster, marking the current user
    pub fn format_users(users: &[String], own_nick: &str) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str("Participants:\n");

        if users.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for user in users {
                let me_suffix = if user == own_nick { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", user, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", byte_count)
    }

    /// Format a raw (unparseable) message
    pub fn format_raw_message(text: &str) -> String {
        format!("\nReceived: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irori_server::infrastructure::dto::websocket::{ChatNotice, NickPayload, UsersPayload};

    // 2023-01-01 00:00:00 JST
    const RECEIVED_AT: i64 = 1672498800000;

    #[test]
    fn test_format_users_marks_me() {
        // テスト項目: ロスターの表示で自分に (me) が付く
        // given (前提条件):
        let users = vec!["alice".to_string(), "bob".to_string()];

        // when (操作):
        let result = MessageFormatter::format_users(&users, "bob");

        // then (期待する結果):
        assert!(result.contains("Participants:"));
        assert!(result.contains("alice\n"));
        assert!(result.contains("bob (me)\n"));
    }

    #[test]
    fn test_format_users_empty() {
        // テスト項目: 空のロスターは (No participants) と表示される
        // given (前提条件):
        let users: Vec<String> = vec![];

        // when (操作):
        let result = MessageFormatter::format_users(&users, "alice");

        // then (期待する結果):
        assert!(result.contains("(No participants)"));
    }

    #[test]
    fn test_format_chat_notice() {
        // テスト項目: チャットは受信時刻付きでそのまま表示される
        // given (前提条件):
        let event = ServerEvent::ChatMsg(ChatNotice {
            message: "<alice> hello".to_string(),
            r#type: NoticeType::ChatMsg,
        });

        // when (操作):
        let result = MessageFormatter::format_server_event(&event, "bob", RECEIVED_AT);

        // then (期待する結果):
        assert_eq!(result, "\n[2023-01-01T00:00:00+09:00] <alice> hello\n");
    }

    #[test]
    fn test_format_error_and_private_notices() {
        // テスト項目: エラーと個別メッセージには目印が付く
        // given (前提条件):
        let error = "* nickname 'bob' already taken";
        let private = "*from: \"alice\": psst";

        // when (操作):
        let error_line = MessageFormatter::format_notice(error, NoticeType::Error, RECEIVED_AT);
        let private_line =
            MessageFormatter::format_notice(private, NoticeType::PvtMsg, RECEIVED_AT);

        // then (期待する結果):
        assert!(error_line.contains("!! * nickname 'bob' already taken"));
        assert!(private_line.contains("(private) *from: \"alice\": psst"));
    }

    #[test]
    fn test_format_nick_event() {
        // テスト項目: nick イベントは割り当てられた名前を表示する
        // given (前提条件):
        let event = ServerEvent::Nick(NickPayload {
            nick: "Guest4".to_string(),
        });

        // when (操作):
        let result = MessageFormatter::format_server_event(&event, "alice", RECEIVED_AT);

        // then (期待する結果):
        assert_eq!(result, "\n* you are 'Guest4'\n");
    }

    #[test]
    fn test_format_users_event_uses_own_nick() {
        // テスト項目: users イベントはロスター表示になる
        // given (前提条件):
        let event = ServerEvent::Users(UsersPayload {
            users: vec!["alice".to_string()],
        });

        // when (操作):
        let result = MessageFormatter::format_server_event(&event, "alice", RECEIVED_AT);

        // then (期待する結果):
        assert!(result.contains("alice (me)"));
    }

    #[test]
    fn test_format_raw_and_binary_messages() {
        // テスト項目: 解釈できないテキストとバイナリの表示
        // given (前提条件):
        let text = "???";

        // when (操作):
        let raw = MessageFormatter::format_raw_message(text);
        let binary = MessageFormatter::format_binary_message(42);

        // then (期待する結果):
        assert_eq!(raw, "\nReceived: ???\n");
        assert_eq!(binary, "\nReceived binary data: 42 bytes\n");
    }
}
