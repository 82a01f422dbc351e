pub struct CommandDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "open",
        aliases: &["goto"],
        description: "Open a link (e.g. :open m9s://mail/server?status=error)",
    },
    CommandDef {
        name: "link",
        aliases: &["ln"],
        description: "Show the link for the current view",
    },
    CommandDef {
        name: "clear",
        aliases: &["cl"],
        description: "Clear every filter",
    },
    CommandDef {
        name: "page",
        aliases: &["p"],
        description: "Go to page (e.g. :page 3)",
    },
    CommandDef {
        name: "length",
        aliases: &["len"],
        description: "Rows per page: 10, 25, 50 or 100",
    },
    CommandDef {
        name: "refresh",
        aliases: &["r"],
        description: "Reload the current page",
    },
    CommandDef {
        name: "quit",
        aliases: &["q"],
        description: "Quit m9s",
    },
    CommandDef {
        name: "help",
        aliases: &["h"],
        description: "Show help",
    },
];

pub fn matching_commands(input: &str) -> Vec<&'static CommandDef> {
    let input_lower = input.to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| {
            cmd.name.starts_with(&input_lower)
                || cmd.aliases.iter().any(|a| a.starts_with(&input_lower))
        })
        .collect()
}

/// Canonical name for a typed command or alias.
pub fn resolve(input: &str) -> Option<&'static str> {
    let input_lower = input.to_lowercase();
    COMMANDS
        .iter()
        .find(|cmd| cmd.name == input_lower || cmd.aliases.contains(&input_lower.as_str()))
        .map(|cmd| cmd.name)
}
