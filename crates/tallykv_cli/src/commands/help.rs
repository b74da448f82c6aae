//! Command language reference.

/// Reference for the command language, appended to `--help`.
pub const COMMAND_REFERENCE: &str = "\
Commands (one per line, tokens separated by whitespace):
  SET name value     Set the variable name to value
  GET name           Print the value of name, or NULL if unset
  UNSET name         Unset the variable name
  NUMEQUALTO value   Print the number of variables set to value
  BEGIN              Open a transaction block (blocks nest)
  ROLLBACK           Undo the most recent open block; NO TRANSACTION if none
  COMMIT             Close all open blocks, keeping their changes;
                     NO TRANSACTION if none
  END                Stop processing the current input

Command words are case-insensitive. Names and values are upper-cased
unless --preserve-case is given. Blank lines and lines starting with #
are skipped.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_lists_every_command() {
        for word in [
            "SET", "GET", "UNSET", "NUMEQUALTO", "BEGIN", "ROLLBACK", "COMMIT", "END",
        ] {
            assert!(
                COMMAND_REFERENCE.contains(&format!("  {word} ")),
                "missing {word}"
            );
        }
    }
}
