use crate::error::{BashUtilsError, Result};
use crate::optdef::token::OptionToken;
use std::fmt;

/// Marker appended to options that take no value.
pub const FLAG_INDICATOR: char = 'f';

/// A formatted entry of the generated bash array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    pub token: OptionToken,
    pub justified: String,
    pub identifier: String,
    pub takes_value: bool,
    pub element: String,
}

impl OptionRecord {
    fn new(token: OptionToken, width: usize) -> Result<Self> {
        let justified = format!("{:>width$}", token.raw(), width = width);
        let padding = &justified[..justified.len() - token.raw().len()];

        let identifier = token.canonical_identifier();
        if identifier.is_empty() {
            return Err(BashUtilsError::MalformedOption {
                token: token.raw().to_string(),
            });
        }

        let takes_value = token.takes_value();
        let element = match token.value_suffix() {
            // Dropping the value shifts the definition left, so the same
            // number of spaces goes in front to keep the closing quote aligned.
            Some(value) => format!(
                "{}{}'{}',{}",
                " ".repeat(value.len()),
                padding,
                token.definition(),
                identifier
            ),
            None => format!(
                "{}'{}',{},{}",
                padding,
                token.definition(),
                identifier,
                FLAG_INDICATOR
            ),
        };

        Ok(Self {
            token,
            justified,
            identifier,
            takes_value,
            element,
        })
    }

    pub fn is_flag(&self) -> bool {
        !self.takes_value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTable {
    array_name: String,
    records: Vec<OptionRecord>,
}

impl OptionTable {
    /// Runs the justification and quoting pass over `tokens`, keeping their
    /// order. An empty token list is an error rather than an empty array.
    pub fn from_tokens<S: Into<String>>(
        array_name: S,
        source: &str,
        tokens: Vec<OptionToken>,
    ) -> Result<Self> {
        let width = tokens
            .iter()
            .map(|token| token.raw().len())
            .max()
            .ok_or_else(|| BashUtilsError::NoOptionsFound {
                program: source.to_string(),
            })?;

        let records = tokens
            .into_iter()
            .map(|token| OptionRecord::new(token, width))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("formatted {} option records (width {})", records.len(), width);

        Ok(Self {
            array_name: array_name.into(),
            records,
        })
    }

    pub fn records(&self) -> &[OptionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn array_name(&self) -> &str {
        &self.array_name
    }

    pub fn value_option_count(&self) -> usize {
        self.records.iter().filter(|r| r.takes_value).count()
    }

    pub fn flag_option_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_flag()).count()
    }

    /// Full text of the output file, newline terminated.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OptionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "local -a {}=(", self.array_name)?;
        for record in &self.records {
            writeln!(f, "{}", record.element)?;
        }
        writeln!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optdef::token::scan_help_text;

    fn table(help: &str) -> OptionTable {
        OptionTable::from_tokens("opt_definitions", "test", scan_help_text(help)).unwrap()
    }

    #[test]
    fn test_flag_and_value_records() {
        let table = table(
            "  -v, --verbose        be verbose\n  -O, --output-document=FILE  write to FILE\n",
        );

        let records = table.records();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].element, "             '-v|--verbose',verbose,f");
        assert!(records[0].is_flag());

        assert_eq!(records[1].element, "     '-O|--output-document',output_document");
        assert!(records[1].takes_value);
    }

    #[test]
    fn test_justification_pads_to_longest() {
        let table = table("  -v, --verbose   x\n       --no-dns-cache   y\n  -q, --quiet  z\n");
        let width = table
            .records()
            .iter()
            .map(|r| r.token.raw().len())
            .max()
            .unwrap();

        let order: Vec<&str> = table.records().iter().map(|r| r.token.raw()).collect();
        assert_eq!(order, vec!["-v|--verbose", "--no-dns-cache", "-q|--quiet"]);

        for record in table.records() {
            assert_eq!(record.justified.len(), width);
            assert!(record.justified.ends_with(record.token.raw()));
        }
    }

    #[test]
    fn test_closing_quotes_are_aligned() {
        let table = table(
            "  -v, --verbose   x\n  -O, --output-document=FILE  y\n       --tries=NUMBER  z\n",
        );
        let columns: Vec<usize> = table
            .records()
            .iter()
            .map(|r| r.element.rfind('\'').unwrap())
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_flag_indicator_exclusive_with_value() {
        let table = table("  -t, --tries=NUMBER  retries\n  -c, --continue  resume\n");
        for record in table.records() {
            let flagged = record.element.ends_with(",f");
            assert_eq!(flagged, !record.takes_value);
        }
    }

    #[test]
    fn test_render_wraps_records_in_array() {
        let table = table("  -v, --verbose  be verbose\n");
        assert_eq!(
            table.render(),
            "local -a opt_definitions=(\n'-v|--verbose',verbose,f\n)\n"
        );
        assert_eq!(table.value_option_count(), 0);
        assert_eq!(table.flag_option_count(), 1);
    }

    #[test]
    fn test_custom_array_name() {
        let tokens = scan_help_text("  --dry-run  nothing\n");
        let table = OptionTable::from_tokens("curl_opts", "curl", tokens).unwrap();
        assert!(table.render().starts_with("local -a curl_opts=(\n"));
        assert_eq!(table.records()[0].identifier, "dry_run");
    }

    #[test]
    fn test_no_options_is_an_error() {
        let result = OptionTable::from_tokens("opt_definitions", "wget", Vec::new());
        assert!(matches!(
            result,
            Err(BashUtilsError::NoOptionsFound { ref program }) if program == "wget"
        ));
    }

    #[test]
    fn test_option_without_name_is_malformed() {
        let tokens = scan_help_text("  --=VALUE  odd\n");
        let result = OptionTable::from_tokens("opt_definitions", "test", tokens);
        assert!(matches!(result, Err(BashUtilsError::MalformedOption { .. })));
    }
}
