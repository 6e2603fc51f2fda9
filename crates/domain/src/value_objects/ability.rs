//! The six abilities and the fixed ability → skill binding.

use crate::error::DomainError;

named_enum! {
    /// One of the six core attributes.
    Ability, DomainError::unknown_ability, {
        Strength => "Strength",
        Dexterity => "Dexterity",
        Constitution => "Constitution",
        Intelligence => "Intelligence",
        Wisdom => "Wisdom",
        Charisma => "Charisma",
    }
}

named_enum! {
    /// A skill, statically bound to exactly one [`Ability`].
    Skill, DomainError::unknown_skill, {
        Athletics => "Athletics",
        Acrobatics => "Acrobatics",
        SleightOfHand => "Sleight of Hand",
        Stealth => "Stealth",
        Investigation => "Investigation",
        History => "History",
        Arcana => "Arcana",
        Nature => "Nature",
        Religion => "Religion",
        Perception => "Perception",
        Survival => "Survival",
        Medicine => "Medicine",
        Insight => "Insight",
        AnimalHandling => "Animal Handling",
        Intimidation => "Intimidation",
        Deception => "Deception",
        Persuasion => "Persuasion",
        Performance => "Performance",
    }
}

impl Ability {
    /// Three-letter abbreviation (STR, DEX, ...).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    /// Skills owned by this ability.
    pub fn skills(&self) -> &'static [Skill] {
        match self {
            Ability::Strength => &[Skill::Athletics],
            Ability::Dexterity => &[Skill::Acrobatics, Skill::SleightOfHand, Skill::Stealth],
            Ability::Constitution => &[],
            Ability::Intelligence => &[
                Skill::Investigation,
                Skill::History,
                Skill::Arcana,
                Skill::Nature,
                Skill::Religion,
            ],
            Ability::Wisdom => &[
                Skill::Perception,
                Skill::Survival,
                Skill::Medicine,
                Skill::Insight,
                Skill::AnimalHandling,
            ],
            Ability::Charisma => &[
                Skill::Intimidation,
                Skill::Deception,
                Skill::Persuasion,
                Skill::Performance,
            ],
        }
    }

    /// Position of this ability in creation order (Strength = 0).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Skill {
    /// The ability that declares this skill.
    pub fn ability(&self) -> Ability {
        Ability::ALL
            .iter()
            .copied()
            .find(|a| a.skills().contains(self))
            // every skill is listed under exactly one ability; the table test guards this
            .unwrap_or(Ability::Strength)
    }

    /// Parse a batch of skill names, failing on the first unknown one.
    pub fn parse_all<'a, I>(names: I) -> Result<Vec<Skill>, DomainError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().map(str::parse).collect()
    }
}
