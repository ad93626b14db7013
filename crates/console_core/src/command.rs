#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Reset,
    Resize,
    Edit,
    Short,
    Aver,
    Help,
    Display,
    Clear,
}

/// Dispatch and `help` both read this table; `help` prints it in this order.
pub const COMMAND_TABLE: [(Command, &str, &str); 9] = [
    (Command::Exit, "exit", "exit the program"),
    (Command::Reset, "reset", "resets the matrix to zeros"),
    (Command::Resize, "resize", "resizes the matrix"),
    (Command::Edit, "edit", "edit the matrix"),
    (Command::Short, "short", "convert short to matrix"),
    (Command::Aver, "aver", "get average of the matrix"),
    (Command::Help, "help", "get this manual"),
    (Command::Display, "display", "display the current matrix"),
    (Command::Clear, "clear", "clear the screen"),
];

impl Command {
    /// Exact name match; callers normalize case first.
    pub fn parse(input: &str) -> Option<Command> {
        COMMAND_TABLE
            .iter()
            .find(|(_, name, _)| *name == input)
            .map(|(command, _, _)| *command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_table_entry_back_to_its_command() {
        for (command, name, _) in COMMAND_TABLE {
            assert_eq!(Command::parse(name), Some(command));
        }
    }

    #[test]
    fn rejects_unknown_and_unnormalized_input() {
        assert_eq!(Command::parse("EXIT"), None);
        assert_eq!(Command::parse(" exit"), None);
        assert_eq!(Command::parse("quit"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn table_lists_commands_in_menu_order() {
        let names: Vec<&str> = COMMAND_TABLE.iter().map(|(_, name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "exit", "reset", "resize", "edit", "short", "aver", "help", "display", "clear"
            ]
        );
    }
}
