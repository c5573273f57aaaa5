use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use super::CollectionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportedCard {
    pub(crate) name: String,
    pub(crate) quantity: u32,
}

/// One card per line: `[qty][x] name [(SET) number]`. Blank lines and `#` or `//` comments
/// are skipped; a line without a leading count is a single copy named by the whole line.
pub(crate) fn parse_deck_text(text: &str) -> Result<Vec<ImportedCard>, CollectionError> {
    let mut cards = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let (quantity, name) = match line.split_once(char::is_whitespace) {
            Some((count, rest)) => match parse_count(count) {
                Some(quantity) => (quantity, strip_set_suffix(rest)),
                None => (1, line),
            },
            None => (1, line),
        };

        if name.is_empty() {
            debug!(line = index + 1, "deck line without a card name skipped");
            continue;
        }
        if quantity == 0 {
            return Err(CollectionError::InvalidQuantity {
                line: index + 1,
                name: name.to_string(),
            });
        }
        cards.push(ImportedCard {
            name: name.to_string(),
            quantity,
        });
    }

    Ok(cards)
}

fn parse_count(token: &str) -> Option<u32> {
    let digits = token
        .strip_suffix('x')
        .or_else(|| token.strip_suffix('X'))
        .unwrap_or(token);
    digits.parse().ok()
}

fn strip_set_suffix(rest: &str) -> &str {
    rest.split('(').next().unwrap_or(rest).trim()
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Name", alias = "card", alias = "Card")]
    name: String,
    #[serde(default, alias = "Quantity", alias = "count", alias = "Count")]
    quantity: Option<u32>,
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<ImportedCard>, CollectionError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut cards = Vec::new();

    for (index, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let name = row.name.trim();
        if name.is_empty() {
            continue;
        }
        let quantity = row.quantity.unwrap_or(1);
        if quantity == 0 {
            return Err(CollectionError::InvalidQuantity {
                line: index + 2,
                name: name.to_string(),
            });
        }
        cards.push(ImportedCard {
            name: name.to_string(),
            quantity,
        });
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;

    fn entry(name: &str, quantity: u32) -> ImportedCard {
        ImportedCard {
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn deck_text_accepts_common_line_shapes() {
        let text = "# Commander\n1 Mishra, Eminent One (BRC) 1\n\n2x Sol Ring\n// sideboard\nArcane Signet\n3 Myr Battlesphere (M11) 207\nLightning   Bolt\n";
        assert_eq!(
            parse_deck_text(text).expect("parses"),
            vec![
                entry("Mishra, Eminent One", 1),
                entry("Sol Ring", 2),
                entry("Arcane Signet", 1),
                entry("Myr Battlesphere", 3),
                entry("Lightning   Bolt", 1),
            ]
        );
    }

    #[test]
    fn non_numeric_prefix_keeps_the_whole_line() {
        assert_eq!(
            parse_deck_text("Ashnod's Altar (EMA) 218").expect("parses"),
            vec![entry("Ashnod's Altar (EMA) 218", 1)]
        );
    }

    #[test]
    fn zero_quantity_is_rejected_with_line_number() {
        let err = parse_deck_text("1 Sol Ring\n0 Skullclamp").expect_err("zero rejected");
        match err {
            CollectionError::InvalidQuantity { line, name } => {
                assert_eq!(line, 2);
                assert_eq!(name, "Skullclamp");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn deck_import_merges_repeated_cards() {
        let collection =
            Collection::from_deck_text("Imported", "1 Sol Ring\n2 sol ring\n1 Skullclamp")
                .expect("parses");
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.cards[0].quantity, 3);
    }

    #[test]
    fn csv_quantity_is_optional() {
        let csv = "name,quantity\nSol Ring,2\nSkullclamp,\n  Howling Mine  ,1\n";
        assert_eq!(
            parse_csv(csv.as_bytes()).expect("parses"),
            vec![entry("Sol Ring", 2), entry("Skullclamp", 1), entry("Howling Mine", 1)]
        );
    }

    #[test]
    fn csv_accepts_capitalised_headers() {
        let collection = Collection::from_csv_reader("Export", "Name,Count\nSol Ring,4\n".as_bytes())
            .expect("parses");
        assert_eq!(collection.cards[0].quantity, 4);
    }

    #[test]
    fn csv_rejects_non_numeric_quantity() {
        assert!(matches!(
            parse_csv("name,quantity\nSol Ring,many\n".as_bytes()),
            Err(CollectionError::Csv(_))
        ));
    }
}
