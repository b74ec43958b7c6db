//! Treeviz formatter for parsed question blocks

use crate::quiz::ast::node::QuestionBlock;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(blocks: &[QuestionBlock]) -> String {
    let mut result = String::new();
    for (i, block) in blocks.iter().enumerate() {
        let is_last = i == blocks.len() - 1;
        append_block(&mut result, block, "", is_last);
    }
    result
}

fn append_block(result: &mut String, block: &QuestionBlock, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} Question {}: {}\n",
        prefix,
        connector,
        block.id,
        truncate(block.statement.as_str(), 30)
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });

    let mut children: Vec<String> = Vec::new();
    if !block.code.is_empty() {
        children.push(format!("Code: {} line(s)", block.code.len()));
    }
    if !block.trailing.is_empty() {
        children.push(format!("Trailing: {}", truncate(block.trailing.as_str(), 30)));
    }
    for choice in &block.choices {
        let marker = if block.answers.contains(choice.id.index()) {
            " *"
        } else {
            ""
        };
        children.push(format!(
            "Choice {}: {}{}",
            choice.id,
            truncate(choice.statement.as_str(), 30),
            marker
        ));
    }
    children.push(format!("Answers: {}", block.answers));

    for (i, child) in children.iter().enumerate() {
        let connector = if i == children.len() - 1 { "└─" } else { "├─" };
        result.push_str(&format!("{}{} {}\n", new_prefix, connector, child));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::lexer::lex;
    use crate::quiz::parsers::{reference, Spacing};

    #[test]
    fn test_single_block() {
        let tokens = lex("1. Pick\n\"\"\"\nx\n\"\"\"\n\ta. one\n\tb. two\nA. (b)\n").unwrap();
        let blocks = reference::parse(&tokens, Spacing::Designed).unwrap();
        assert_eq!(
            to_treeviz_str(&blocks),
            "└─ Question 1.: Pick\n  \
             ├─ Code: 1 line(s)\n  \
             ├─ Choice a.: one\n  \
             ├─ Choice b.: two *\n  \
             └─ Answers: (b)\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
