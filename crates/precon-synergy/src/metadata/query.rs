use crate::cards::{CardAttributes, ColorIdentity, ColorParseError};

/// Parsed card search expression.
///
/// Whitespace-separated terms are AND-ed, `OR` binds looser than juxtaposition and
/// parentheses group. Recognised filters: `type:`/`t:`, `o:`/`oracle:`, `kw:`/`keyword:`,
/// `id:`/`identity:` (identity subset) and `name:`; a bare word matches the card name.
#[derive(Debug, Clone, PartialEq)]
pub enum CardQuery {
    And(Vec<CardQuery>),
    Or(Vec<CardQuery>),
    TypeLine(String),
    RulesText(String),
    Keyword(String),
    Identity(ColorIdentity),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("search query is empty")]
    Empty,
    #[error("unterminated quote in search query")]
    UnterminatedQuote,
    #[error("unbalanced parentheses in search query")]
    UnbalancedParens,
    #[error("dangling OR in search query")]
    DanglingOr,
    #[error("unknown search filter '{0}'")]
    UnknownFilter(String),
    #[error(transparent)]
    Identity(#[from] ColorParseError),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Or,
    Term(String),
}

impl CardQuery {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let tokens = tokenize(raw)?;
        if tokens.is_empty() {
            return Err(QueryError::Empty);
        }
        let mut parser = Parser { tokens, position: 0 };
        let query = parser.or_expression()?;
        if parser.position != parser.tokens.len() {
            return Err(QueryError::UnbalancedParens);
        }
        Ok(query)
    }

    pub fn matches(&self, card: &CardAttributes) -> bool {
        match self {
            CardQuery::And(parts) => parts.iter().all(|part| part.matches(card)),
            CardQuery::Or(parts) => parts.iter().any(|part| part.matches(card)),
            CardQuery::TypeLine(needle) => card.type_line_lower().contains(needle),
            CardQuery::RulesText(needle) => card.rules_text_lower().contains(needle),
            CardQuery::Keyword(needle) => card.keywords_lower().iter().any(|k| k == needle),
            CardQuery::Identity(identity) => card.color_identity.is_subset_of(*identity),
            CardQuery::Name(needle) => card.name.to_lowercase().contains(needle),
        }
    }
}

fn tokenize(raw: &str) -> Result<Vec<Token>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            _ => {
                let mut term = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    chars.next();
                    if c == '"' {
                        let mut closed = false;
                        for quoted in chars.by_ref() {
                            if quoted == '"' {
                                closed = true;
                                break;
                            }
                            term.push(quoted);
                        }
                        if !closed {
                            return Err(QueryError::UnterminatedQuote);
                        }
                    } else {
                        term.push(c);
                    }
                }
                if term == "OR" {
                    tokens.push(Token::Or);
                } else {
                    tokens.push(Token::Term(term));
                }
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn or_expression(&mut self) -> Result<CardQuery, QueryError> {
        let mut branches = vec![self.and_expression()?];
        while self.peek() == Some(&Token::Or) {
            self.position += 1;
            branches.push(self.and_expression()?);
        }
        Ok(collapse(branches, CardQuery::Or))
    }

    fn and_expression(&mut self) -> Result<CardQuery, QueryError> {
        let mut terms = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Open) => {
                    self.position += 1;
                    let inner = self.or_expression()?;
                    if self.peek() != Some(&Token::Close) {
                        return Err(QueryError::UnbalancedParens);
                    }
                    self.position += 1;
                    terms.push(inner);
                }
                Some(Token::Term(term)) => {
                    let term = parse_term(term)?;
                    self.position += 1;
                    terms.push(term);
                }
                Some(Token::Close) | Some(Token::Or) | None => break,
            }
        }
        if terms.is_empty() {
            return Err(match self.peek() {
                Some(Token::Close) => QueryError::UnbalancedParens,
                _ => QueryError::DanglingOr,
            });
        }
        Ok(collapse(terms, CardQuery::And))
    }
}

fn collapse(mut parts: Vec<CardQuery>, wrap: fn(Vec<CardQuery>) -> CardQuery) -> CardQuery {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        wrap(parts)
    }
}

fn parse_term(raw: &str) -> Result<CardQuery, QueryError> {
    let Some((filter, value)) = raw.split_once(':') else {
        return Ok(CardQuery::Name(raw.to_lowercase()));
    };
    let value = value.to_lowercase();
    let query = match filter.to_ascii_lowercase().as_str() {
        "type" | "t" => CardQuery::TypeLine(value),
        "o" | "oracle" => CardQuery::RulesText(value),
        "kw" | "keyword" => CardQuery::Keyword(value),
        "name" => CardQuery::Name(value),
        "id" | "identity" | "ci" => {
            let symbols: Vec<String> = value.chars().map(String::from).collect();
            CardQuery::Identity(ColorIdentity::from_symbols(symbols)?)
        }
        _ => return Err(QueryError::UnknownFilter(filter.to_string())),
    };
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, identity: &str, type_line: &str, text: &str) -> CardAttributes {
        CardAttributes::new(name, identity.parse().expect("valid identity"))
            .with_type_line(type_line)
            .with_rules_text(text)
    }

    #[test]
    fn quoted_values_keep_spaces() {
        let query = CardQuery::parse(r#"o:"+1/+1 counter" id:GW"#).expect("parses");
        assert_eq!(
            query,
            CardQuery::And(vec![
                CardQuery::RulesText("+1/+1 counter".to_string()),
                CardQuery::Identity("GW".parse().expect("identity")),
            ])
        );
    }

    #[test]
    fn nested_or_groups_parse() {
        let query = CardQuery::parse(r#"(type:equipment OR (type:aura o:"enchant creature")) id:W"#)
            .expect("parses");
        let aura = card("Aura", "W", "Enchantment — Aura", "Enchant creature");
        let equipment = card("Blade", "C", "Artifact — Equipment", "Equip {2}");
        let sorcery = card("Wrath", "W", "Sorcery", "Destroy all creatures.");
        let red_aura = card("Fire", "R", "Enchantment — Aura", "Enchant creature");

        assert!(query.matches(&aura));
        assert!(query.matches(&equipment));
        assert!(!query.matches(&sorcery));
        assert!(!query.matches(&red_aura));
    }

    #[test]
    fn colorless_identity_filter_only_admits_colorless_cards() {
        let query = CardQuery::parse("id:C").expect("parses");
        assert!(query.matches(&card("Sol Ring", "colorless", "Artifact", "")));
        assert!(!query.matches(&card("Bolt", "R", "Instant", "")));
    }

    #[test]
    fn malformed_queries_are_rejected() {
        assert_eq!(CardQuery::parse("   "), Err(QueryError::Empty));
        assert_eq!(
            CardQuery::parse(r#"o:"unterminated"#),
            Err(QueryError::UnterminatedQuote)
        );
        assert_eq!(
            CardQuery::parse("(type:artifact"),
            Err(QueryError::UnbalancedParens)
        );
        assert_eq!(CardQuery::parse("type:artifact OR"), Err(QueryError::DanglingOr));
        assert!(matches!(
            CardQuery::parse("id:XYZ"),
            Err(QueryError::Identity(_))
        ));
        assert_eq!(
            CardQuery::parse("cmc:3"),
            Err(QueryError::UnknownFilter("cmc".to_string()))
        );
    }
}
