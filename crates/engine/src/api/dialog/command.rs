//! Slash-command parsing.

/// Commands understood by the dialog front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Cancel,
    CreateCharacter,
    ListCharacters,
    ViewCharacter,
    DeleteCharacter,
    SetActive,
    GetActive,
    Proficiencies,
    Expertise,
    SavingThrows,
    SetStat,
    SetMoney,
    Inventory,
    ViewEquipment,
    SetSpellSlots,
    AddSpell,
    RemoveSpell,
    SetDescription,
    ViewDescription,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Command::Start,
        Command::Help,
        Command::Cancel,
        Command::CreateCharacter,
        Command::ListCharacters,
        Command::ViewCharacter,
        Command::DeleteCharacter,
        Command::SetActive,
        Command::GetActive,
        Command::Proficiencies,
        Command::Expertise,
        Command::SavingThrows,
        Command::SetStat,
        Command::SetMoney,
        Command::Inventory,
        Command::ViewEquipment,
        Command::SetSpellSlots,
        Command::AddSpell,
        Command::RemoveSpell,
        Command::SetDescription,
        Command::ViewDescription,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Cancel => "cancel",
            Command::CreateCharacter => "create_character",
            Command::ListCharacters => "list_characters",
            Command::ViewCharacter => "view_character",
            Command::DeleteCharacter => "delete_character",
            Command::SetActive => "set_active",
            Command::GetActive => "get_active",
            Command::Proficiencies => "proficiencies",
            Command::Expertise => "expertise",
            Command::SavingThrows => "saving_throws",
            Command::SetStat => "set_stat",
            Command::SetMoney => "set_money",
            Command::Inventory => "inventory",
            Command::ViewEquipment => "view_equipment",
            Command::SetSpellSlots => "set_spell_slots",
            Command::AddSpell => "add_spell",
            Command::RemoveSpell => "remove_spell",
            Command::SetDescription => "set_description",
            Command::ViewDescription => "view_description",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Command::Start => "show the welcome message",
            Command::Help => "list commands",
            Command::Cancel => "abandon the current dialog",
            Command::CreateCharacter => "create a new character",
            Command::ListCharacters => "list your characters",
            Command::ViewCharacter => "show a character sheet",
            Command::DeleteCharacter => "delete a character",
            Command::SetActive => "choose your active character",
            Command::GetActive => "show your active character",
            Command::Proficiencies => "toggle skill proficiencies",
            Command::Expertise => "toggle skill expertise",
            Command::SavingThrows => "set saving throw proficiencies",
            Command::SetStat => "edit scores, hit points, armor class, speed or level",
            Command::SetMoney => "add or spend coins",
            Command::Inventory => "add or remove equipment",
            Command::ViewEquipment => "show equipment and money",
            Command::SetSpellSlots => "set spell slots per level",
            Command::AddSpell => "learn a cantrip or spell",
            Command::RemoveSpell => "forget a cantrip or spell",
            Command::SetDescription => "write a character description",
            Command::ViewDescription => "show a character description",
        }
    }

    /// Commands that operate on one character.
    pub fn targets_character(&self) -> bool {
        !matches!(
            self,
            Command::Start
                | Command::Help
                | Command::Cancel
                | Command::CreateCharacter
                | Command::ListCharacters
                | Command::GetActive
        )
    }

    /// Whether a missing inline name falls back to the active character.
    /// Choosing or deleting a character always asks.
    pub fn defaults_to_active(&self) -> bool {
        self.targets_character()
            && !matches!(self, Command::SetActive | Command::DeleteCharacter)
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Command {
        command: Command,
        argument: Option<&'a str>,
    },
    UnknownCommand(&'a str),
    Text(&'a str),
}

/// Classify a trimmed line. `/cmd@bot` suffixes are ignored.
pub fn parse(line: &str) -> Input<'_> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Input::Text(line);
    };

    let (word, argument) = match rest.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };
    let keyword = word.split('@').next().unwrap_or(word);

    match Command::ALL
        .iter()
        .find(|c| c.keyword().eq_ignore_ascii_case(keyword))
    {
        Some(command) => Input::Command {
            command: *command,
            argument,
        },
        None => Input::UnknownCommand(word),
    }
}
