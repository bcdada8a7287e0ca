//! 对话消息与短期记忆
//!
//! Message 与 LLM API 的 role/content 结构一一对应；ConversationMemory 保留最近
//! N 轮对话（user/assistant 对），超出时自动剪枝，避免长会话撑爆模型上下文。

use serde::{Deserialize, Serialize};

/// 消息角色（与 LLM API 一致）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// 单条消息
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// 会话退出指令（两个入口共用同一套规则，消除各自为政的哨兵字符串）
pub const EXIT_COMMANDS: &[&str] = &["exit", "quit", "sair"];

/// 判断输入是否为退出指令：trim 后不区分大小写整串匹配
pub fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim();
    EXIT_COMMANDS
        .iter()
        .any(|cmd| trimmed.eq_ignore_ascii_case(cmd))
}

/// 短期记忆：最近 N 轮对话（每轮含 user + assistant，故实际保留约 max_turns*2 条消息）
#[derive(Clone, Debug)]
pub struct ConversationMemory {
    messages: Vec<Message>,
    max_turns: usize,
}

impl ConversationMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_turns,
        }
    }

    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
        self.prune();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// 超出 max_turns*2 时丢弃最旧的消息，保留最近部分
    fn prune(&mut self) {
        if self.messages.len() > self.max_turns * 2 {
            let keep = self.max_turns * 2;
            self.messages.drain(..self.messages.len() - keep);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_command_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  QUIT  "));
        assert!(is_exit_command("Sair"));
        assert!(!is_exit_command("exit please"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn test_memory_prunes_oldest() {
        let mut mem = ConversationMemory::new(2);
        for i in 0..6 {
            mem.push(Message::user(format!("u{i}")));
            mem.push(Message::assistant(format!("a{i}")));
        }
        assert_eq!(mem.len(), 4);
        assert_eq!(mem.messages()[0].content, "u4");
        assert_eq!(mem.messages()[3].content, "a5");
    }

    #[test]
    fn test_memory_clear() {
        let mut mem = ConversationMemory::new(4);
        mem.push(Message::user("hi"));
        assert!(!mem.is_empty());
        mem.clear();
        assert!(mem.is_empty());
    }
}
