//! Reserved-word recognition.
//!
//! Cypher keywords are case-insensitive. The table is a compile-time `match`,
//! so lookups need no initialization and are safe to share across threads.

use super::token::TokenKind;

/// Looks up a reserved word by name (case-insensitive).
pub fn lookup_keyword(name: &str) -> Option<TokenKind> {
    // Longest reserved word is "DESCENDING"; skip the allocation for longer names.
    if name.len() > 10 {
        return None;
    }

    let kind = match name.to_ascii_lowercase().as_str() {
        "match" => TokenKind::Match,
        "optional" => TokenKind::Optional,
        "mandatory" => TokenKind::Mandatory,
        "create" => TokenKind::Create,
        "merge" => TokenKind::Merge,
        "set" => TokenKind::Set,
        "delete" => TokenKind::Delete,
        "detach" => TokenKind::Detach,
        "remove" => TokenKind::Remove,
        "with" => TokenKind::With,
        "unwind" => TokenKind::Unwind,
        "return" => TokenKind::Return,
        "union" => TokenKind::Union,
        "call" => TokenKind::Call,
        "yield" => TokenKind::Yield,
        "where" => TokenKind::Where,
        "order" => TokenKind::Order,
        "by" => TokenKind::By,
        "skip" => TokenKind::Skip,
        "limit" => TokenKind::Limit,
        "on" => TokenKind::On,
        "cypher" => TokenKind::Cypher,

        "asc" => TokenKind::Asc,
        "ascending" => TokenKind::Ascending,
        "desc" => TokenKind::Desc,
        "descending" => TokenKind::Descending,
        "distinct" => TokenKind::Distinct,
        "as" => TokenKind::As,
        "all" => TokenKind::All,

        "case" => TokenKind::Case,
        "when" => TokenKind::When,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "end" => TokenKind::End,

        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "xor" => TokenKind::Xor,
        "not" => TokenKind::Not,
        "in" => TokenKind::In,
        "is" => TokenKind::Is,
        "contains" => TokenKind::Contains,
        "starts" => TokenKind::Starts,
        "ends" => TokenKind::Ends,
        "exists" => TokenKind::Exists,

        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,

        "add" => TokenKind::Add,
        "constraint" => TokenKind::Constraint,
        "do" => TokenKind::Do,
        "drop" => TokenKind::Drop,
        "for" => TokenKind::For,
        "of" => TokenKind::Of,
        "require" => TokenKind::Require,
        "scalar" => TokenKind::Scalar,
        "unique" => TokenKind::Unique,

        _ => return None,
    };

    Some(kind)
}

/// Returns true if the given name is a reserved word (case-insensitive).
pub fn is_keyword(name: &str) -> bool {
    lookup_keyword(name).is_some()
}
