//! Plain-text rendering of sheets and ledgers.

use std::fmt::Write;

use charsheet_domain::{
    Ability, Character, Coins, EquipmentCategory, ProficiencyLevel, Skill,
};

use super::command::Command;

pub(super) fn help() -> String {
    let mut text = String::from("Commands:\n");
    for command in Command::ALL {
        let _ = writeln!(text, "/{} - {}", command.keyword(), command.summary());
    }
    text.push_str("\nCommands that act on a character accept its name inline, e.g. /view_character Aria.");
    text
}

/// "Aria - Elf Wizard, level 3"
pub(super) fn summary_line(character: &Character) -> String {
    let mut line = format!(
        "{} - {} {}, level {}",
        character.name(),
        character.race(),
        character.class(),
        character.level()
    );
    if character.is_active() {
        line.push_str(" (active)");
    }
    line
}

pub(super) fn roster(characters: &[Character]) -> String {
    let mut text = String::from("Your characters:\n");
    for character in characters {
        let _ = writeln!(text, "- {}", summary_line(character));
    }
    text.trim_end().to_string()
}

pub(super) fn sheet(character: &Character) -> String {
    let mut text = summary_line(character);
    text.push_str("\n\nAbilities:\n");
    for (ability, entry) in character.abilities().iter() {
        let marker = if entry.saving_throw_proficient() { "*" } else { "" };
        let _ = writeln!(
            text,
            "{} {} ({:+}), save {:+}{}",
            ability.abbreviation(),
            entry.score(),
            entry.modifier(),
            entry.saving_throw_bonus(),
            marker
        );
    }

    text.push_str("\nSkills:\n");
    text.push_str(&skills(character));

    let progression = character.progression();
    let hp = progression.hit_points();
    let speed = progression.speed();
    let _ = write!(
        text,
        "\n\nHit points: {}/{}",
        hp.current(),
        hp.max()
    );
    if hp.temporary() > 0 {
        let _ = write!(text, " (+{} temporary)", hp.temporary());
    }
    let _ = write!(
        text,
        "\nArmor class: {}\nProficiency bonus: +{}\nSpeed: {} ft",
        progression.armor_class(),
        progression.proficiency_bonus(),
        speed.walk
    );
    for (label, value) in [
        ("fly", speed.fly),
        ("swim", speed.swim),
        ("climb", speed.climb),
        ("burrow", speed.burrow),
    ] {
        if value > 0 {
            let _ = write!(text, ", {} {} ft", label, value);
        }
    }

    if character.class().spellcasting_ability().is_some() {
        text.push_str("\n\n");
        text.push_str(&spells(character));
    }

    if let Some(description) = character.description() {
        let _ = write!(text, "\n\n{}", description);
    }
    text
}

/// One line per skill with its bonus; proficiency marked with `*`,
/// expertise with `**`.
pub(super) fn skills(character: &Character) -> String {
    let ledger = character.proficiencies();
    Skill::ALL
        .iter()
        .map(|skill| {
            let marker = match ledger.level(*skill) {
                ProficiencyLevel::None => "",
                ProficiencyLevel::Proficient => "*",
                ProficiencyLevel::Expert => "**",
            };
            format!(
                "{} ({}) {:+}{}",
                skill,
                skill.ability().abbreviation(),
                ledger.skill_bonus(*skill),
                marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn saving_throws(character: &Character) -> String {
    Ability::ALL
        .iter()
        .map(|ability| {
            let entry = character.abilities().get(*ability);
            let marker = if entry.saving_throw_proficient() { "*" } else { "" };
            format!("{} {:+}{}", ability, entry.saving_throw_bonus(), marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn balance(coins: Coins) -> String {
    coins
        .iter()
        .map(|(denomination, amount)| format!("{}: {}", denomination, amount))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn equipment(character: &Character) -> String {
    let ledger = character.equipment();
    let mut text = String::new();
    for category in EquipmentCategory::ALL {
        let items = ledger.items(*category);
        let listed = if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        };
        let _ = writeln!(text, "{}: {}", category, listed);
    }
    text.push_str("\nMoney:\n");
    text.push_str(&balance(ledger.money()));
    text
}

pub(super) fn spells(character: &Character) -> String {
    let record = character.spellcasting();
    let mut text = format!(
        "Spell save DC: {}\nSpell attack bonus: {:+}",
        record.spell_save_dc(),
        record.spell_attack_bonus()
    );

    let slots: Vec<String> = record
        .slots()
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(level, count)| format!("{}: {}", level, count))
        .collect();
    if !slots.is_empty() {
        let _ = write!(text, "\nSlots: {}", slots.join(", "));
    }
    if !record.cantrips().is_empty() {
        let _ = write!(text, "\nCantrips: {}", record.cantrips().join(", "));
    }
    if !record.spells().is_empty() {
        let listed: Vec<String> = record.spells().iter().map(ToString::to_string).collect();
        let _ = write!(text, "\nSpells: {}", listed.join(", "));
    }
    text
}
