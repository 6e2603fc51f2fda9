//! Transport-agnostic dialog front end.
//!
//! Turns one line of user text into one [`Reply`]. Each owner has a single
//! session; turns from the same owner are serialized on that session's lock,
//! which also serializes the load-modify-save sequence per owner.

mod command;
mod render;
mod session;

use std::sync::Arc;

use charsheet_domain::{
    Ability, Character, CharacterClass, CharacterDraft, CharacterName, Coins, CreationStep, DomainError,
    DraftProgress, EquipmentCategory, KnownSpell, MoneyOperation, OwnerId, Race, Speed,
    MAX_SPELL_LEVEL,
};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::app::App;
use crate::use_cases::ManagementError;

pub use command::Command;
use command::Input;
use session::{ListAction, Session, SpellKind, StatField, Step};

/// Text for the user plus suggested answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub options: Vec<String>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    fn prefixed(mut self, message: &str) -> Self {
        self.text = format!("{}\n{}", message, self.text);
        self
    }
}

/// Result of feeding input to a step.
enum Outcome {
    /// Dialog finished
    Done(Reply),
    /// Move on to another state
    Next(Session, Reply),
    /// Input rejected; stay on the same step
    Retry(String),
}

const NO_CHARACTERS: &str = "You have no characters yet. Use /create_character to make one.";

pub struct DialogService {
    app: Arc<App>,
    sessions: DashMap<OwnerId, Arc<Mutex<Session>>>,
}

impl DialogService {
    pub fn new(app: Arc<App>) -> Self {
        Self {
            app,
            sessions: DashMap::new(),
        }
    }

    /// Handle one line of input from `owner`.
    pub async fn handle(&self, owner: &OwnerId, text: &str) -> Reply {
        let slot = self
            .sessions
            .entry(owner.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Session::Idle)))
            .clone();
        let reply = {
            let mut session = slot.lock().await;
            self.turn(owner, &mut session, text).await
        };
        drop(slot);
        self.release_idle(owner);
        reply
    }

    /// Number of owners with a stored session.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    async fn turn(&self, owner: &OwnerId, session: &mut Session, text: &str) -> Reply {
        match command::parse(text) {
            Input::Command { command, argument } => {
                tracing::debug!(%owner, command = command.keyword(), "Dialog command");
                // A command always abandons whatever was in progress
                *session = Session::Idle;
                let (next, reply) = self.start(owner, command, argument).await;
                *session = next;
                reply
            }
            Input::UnknownCommand(word) => Reply::text(format!(
                "Unknown command /{}. Send /help for the list of commands.",
                word
            )),
            Input::Text(text) => {
                let state = std::mem::take(session);
                let (next, reply) = self.resume(owner, state, text).await;
                *session = next;
                reply
            }
        }
    }

    /// Drop the owner's entry once it is idle and no other turn holds it.
    ///
    /// Runs under the shard lock, so a turn that is about to clone the entry
    /// either sees it removed or keeps it alive.
    fn release_idle(&self, owner: &OwnerId) {
        self.sessions.remove_if(owner, |_, slot| {
            Arc::strong_count(slot) == 1
                && slot
                    .try_lock()
                    .map(|session| matches!(*session, Session::Idle))
                    .unwrap_or(false)
        });
    }

    // =========================================================================
    // Commands
    // =========================================================================

    async fn start(
        &self,
        owner: &OwnerId,
        command: Command,
        argument: Option<&str>,
    ) -> (Session, Reply) {
        match command {
            Command::Start => (
                Session::Idle,
                Reply::text(format!(
                    "Welcome! I keep your tabletop character sheets.\n\n{}",
                    render::help()
                )),
            ),
            Command::Help => (Session::Idle, Reply::text(render::help())),
            Command::Cancel => (Session::Idle, Reply::text("Cancelled.")),
            Command::CreateCharacter => self.start_creation(owner, argument).await,
            Command::ListCharacters => {
                let reply = match self.app.use_cases.management.roster.list(owner).await {
                    Ok(characters) if characters.is_empty() => Reply::text(NO_CHARACTERS),
                    Ok(characters) => Reply::text(render::roster(&characters)),
                    Err(e) => error_reply(owner, &e),
                };
                (Session::Idle, reply)
            }
            Command::GetActive => {
                let reply = match self.app.use_cases.management.roster.get_active(owner).await {
                    Ok(Some(character)) => Reply::text(format!(
                        "Your active character: {}",
                        render::summary_line(&character)
                    )),
                    Ok(None) => Reply::text(
                        "You have no active character. Use /set_active to choose one.",
                    ),
                    Err(e) => error_reply(owner, &e),
                };
                (Session::Idle, reply)
            }
            _ => self.select_target(owner, command, argument).await,
        }
    }

    async fn start_creation(&self, owner: &OwnerId, argument: Option<&str>) -> (Session, Reply) {
        let draft = match self.app.use_cases.creation.start(owner).await {
            Ok(draft) => draft,
            Err(e) => return (Session::Idle, error_reply(owner, &e)),
        };
        match argument {
            Some(name) => self.continue_creation(owner, draft, name).await,
            None => (
                Session::Creating(draft),
                creation_prompt(CreationStep::Name),
            ),
        }
    }

    /// Resolve the character a targeted command acts on.
    async fn select_target(
        &self,
        owner: &OwnerId,
        command: Command,
        argument: Option<&str>,
    ) -> (Session, Reply) {
        let roster = &self.app.use_cases.management.roster;

        if let Some(name) = argument {
            return match CharacterName::new(name) {
                Ok(name) => self.open_target(owner, command, &name).await,
                Err(e) => (Session::Idle, Reply::text(e.to_string())),
            };
        }

        if command.defaults_to_active() {
            match roster.get_active(owner).await {
                Ok(Some(active)) => return self.begin(owner, command, active).await,
                Ok(None) => {}
                Err(e) => return (Session::Idle, error_reply(owner, &e)),
            }
        }

        match roster.list(owner).await {
            Ok(characters) if characters.is_empty() => (Session::Idle, Reply::text(NO_CHARACTERS)),
            Ok(characters) => (
                Session::SelectingCharacter(command),
                Reply::text("Choose a character:")
                    .with_options(characters.iter().map(|c| c.name().to_string())),
            ),
            Err(e) => (Session::Idle, error_reply(owner, &e)),
        }
    }

    async fn open_target(
        &self,
        owner: &OwnerId,
        command: Command,
        name: &CharacterName,
    ) -> (Session, Reply) {
        match self.app.use_cases.management.roster.get(owner, name).await {
            Ok(character) => self.begin(owner, command, character).await,
            Err(e) => (Session::Idle, error_reply(owner, &e)),
        }
    }

    /// First turn of a targeted command once the character is known.
    async fn begin(&self, owner: &OwnerId, command: Command, character: Character) -> (Session, Reply) {
        let management = &self.app.use_cases.management;
        let collect = |step: Step, reply: Reply| {
            (
                Session::Collecting {
                    target: character.name().clone(),
                    step,
                },
                reply,
            )
        };

        match command {
            Command::ViewCharacter => (Session::Idle, Reply::text(render::sheet(&character))),
            Command::ViewEquipment => (Session::Idle, Reply::text(render::equipment(&character))),
            Command::ViewDescription => {
                let text = match character.description() {
                    Some(description) => format!("{}:\n{}", character.name(), description),
                    None => format!("{} has no description yet.", character.name()),
                };
                (Session::Idle, Reply::text(text))
            }
            Command::SetActive => {
                let reply = match management.roster.set_active(owner, character.name()).await {
                    Ok(active) => {
                        Reply::text(format!("{} is now your active character.", active.name()))
                    }
                    Err(e) => error_reply(owner, &e),
                };
                (Session::Idle, reply)
            }
            Command::DeleteCharacter => collect(
                Step::ConfirmDelete,
                Reply::text(format!(
                    "Delete {}? This cannot be undone.",
                    character.name()
                ))
                .with_options(["yes", "no"]),
            ),
            Command::Proficiencies | Command::Expertise => {
                let expertise = command == Command::Expertise;
                let step = Step::SkillList { expertise };
                let reply = prompt(&step).prefixed(&render::skills(&character));
                collect(step, reply)
            }
            Command::SavingThrows => {
                let step = Step::AbilityList;
                let reply = prompt(&step).prefixed(&render::saving_throws(&character));
                collect(step, reply)
            }
            Command::SetStat => collect(Step::StatField, prompt(&Step::StatField)),
            Command::SetMoney => {
                let step = Step::MoneyOperation;
                let reply = prompt(&step).prefixed(&format!(
                    "Current balance:\n{}",
                    render::balance(character.equipment().money())
                ));
                collect(step, reply)
            }
            Command::Inventory => {
                let step = Step::InventoryAction;
                let reply = prompt(&step).prefixed(&render::equipment(&character));
                collect(step, reply)
            }
            Command::SetSpellSlots => collect(Step::SpellSlots, prompt(&Step::SpellSlots)),
            Command::AddSpell => {
                let step = Step::SpellKind(ListAction::Add);
                collect(step.clone(), prompt(&step))
            }
            Command::RemoveSpell => {
                let step = Step::SpellKind(ListAction::Remove);
                collect(step.clone(), prompt(&step))
            }
            Command::SetDescription => collect(Step::DescriptionText, prompt(&Step::DescriptionText)),
            Command::Start
            | Command::Help
            | Command::Cancel
            | Command::CreateCharacter
            | Command::ListCharacters
            | Command::GetActive => (Session::Idle, Reply::text(render::help())),
        }
    }

    // =========================================================================
    // Follow-up input
    // =========================================================================

    async fn resume(&self, owner: &OwnerId, state: Session, text: &str) -> (Session, Reply) {
        match state {
            Session::Idle => (
                Session::Idle,
                Reply::text("Send /help to see what I can do."),
            ),
            Session::Creating(draft) => self.continue_creation(owner, draft, text).await,
            Session::SelectingCharacter(command) => {
                let name = match CharacterName::new(text) {
                    Ok(name) => name,
                    Err(e) => {
                        return (
                            Session::SelectingCharacter(command),
                            Reply::text(format!("{}\nChoose a character:", e)),
                        )
                    }
                };
                match self.app.use_cases.management.roster.get(owner, &name).await {
                    Ok(character) => self.begin(owner, command, character).await,
                    Err(ManagementError::NotFound { .. }) => (
                        Session::SelectingCharacter(command),
                        Reply::text(format!("No character named {}. Choose a character:", name)),
                    ),
                    Err(e) => (Session::Idle, error_reply(owner, &e)),
                }
            }
            Session::Collecting { target, step } => {
                match self.apply_step(owner, &target, &step, text).await {
                    Outcome::Done(reply) => (Session::Idle, reply),
                    Outcome::Next(next, reply) => (next, reply),
                    Outcome::Retry(message) => {
                        tracing::debug!(%owner, character = %target, ?step, "Re-prompting step");
                        let reply = prompt(&step).prefixed(&message);
                        (Session::Collecting { target, step }, reply)
                    }
                }
            }
        }
    }

    async fn continue_creation(
        &self,
        owner: &OwnerId,
        mut draft: CharacterDraft,
        text: &str,
    ) -> (Session, Reply) {
        match draft.submit(text) {
            Ok(DraftProgress::Next(step)) => {
                tracing::debug!(%owner, ?step, "Creation step accepted");
                (Session::Creating(draft), creation_prompt(step))
            }
            Ok(DraftProgress::Complete(character)) => {
                match self.app.use_cases.creation.complete(*character).await {
                    Ok(created) => (
                        Session::Idle,
                        Reply::text(format!(
                            "Character created!\n\n{}",
                            render::sheet(&created)
                        )),
                    ),
                    Err(e) => (Session::Idle, error_reply(owner, &e)),
                }
            }
            Err(e) => {
                let step = draft.step();
                (
                    Session::Creating(draft),
                    creation_prompt(step).prefixed(&e.to_string()),
                )
            }
        }
    }

    async fn apply_step(
        &self,
        owner: &OwnerId,
        target: &CharacterName,
        step: &Step,
        text: &str,
    ) -> Outcome {
        let management = &self.app.use_cases.management;
        let collect = |step: Step| {
            let reply = prompt(&step);
            Outcome::Next(
                Session::Collecting {
                    target: target.clone(),
                    step,
                },
                reply,
            )
        };

        match step {
            Step::ConfirmDelete => match text.to_lowercase().as_str() {
                "yes" | "y" => finish(
                    owner,
                    management.roster.delete(owner, target).await,
                    |()| format!("{} deleted.", target),
                ),
                "no" | "n" => Outcome::Done(Reply::text("Deletion cancelled.")),
                _ => Outcome::Retry("Please answer yes or no.".into()),
            },

            Step::SkillList { expertise } => {
                let names = split_list(text);
                let result = if *expertise {
                    management.sheet.toggle_expertise(owner, target, &names).await
                } else {
                    management.sheet.toggle_proficiencies(owner, target, &names).await
                };
                finish(owner, result, |(character, change)| {
                    let mut lines = Vec::new();
                    if !change.added.is_empty() {
                        lines.push(format!("Added: {}", join(&change.added)));
                    }
                    if !change.removed.is_empty() {
                        lines.push(format!("Removed: {}", join(&change.removed)));
                    }
                    lines.push(render::skills(&character));
                    lines.join("\n")
                })
            }

            Step::AbilityList => {
                let names = if text.eq_ignore_ascii_case("none") {
                    Vec::new()
                } else {
                    split_list(text)
                };
                finish(
                    owner,
                    management.sheet.set_saving_throws(owner, target, &names).await,
                    |character| {
                        format!("Saving throws updated:\n{}", render::saving_throws(&character))
                    },
                )
            }

            Step::StatField => match StatField::parse(text) {
                Some(field) => collect(Step::StatValue(field)),
                None => Outcome::Retry(format!("Unknown stat '{}'.", text)),
            },

            Step::StatValue(field) => self.apply_stat(owner, target, *field, text).await,

            Step::MoneyOperation => match text.parse::<MoneyOperation>() {
                Ok(operation) => collect(Step::MoneyAmounts(operation)),
                Err(e) => Outcome::Retry(e.to_string()),
            },

            Step::MoneyAmounts(operation) => {
                let amounts = match parse_numbers::<u32>(text, "money")
                    .and_then(|values| Coins::from_slice(&values))
                {
                    Ok(amounts) => amounts,
                    Err(e) => return Outcome::Retry(e.to_string()),
                };
                finish(
                    owner,
                    management
                        .equipment
                        .adjust_money(owner, target, *operation, amounts)
                        .await,
                    |balance| format!("New balance:\n{}", render::balance(balance)),
                )
            }

            Step::InventoryAction => match ListAction::parse(text) {
                Some(action) => collect(Step::InventoryCategory(action)),
                None => Outcome::Retry("Please answer add or remove.".into()),
            },

            Step::InventoryCategory(action) => {
                let category = match text.parse::<EquipmentCategory>() {
                    Ok(category) => category,
                    Err(e) => return Outcome::Retry(e.to_string()),
                };
                let next = Step::InventoryItem(*action, category);
                if *action == ListAction::Add {
                    return collect(next);
                }
                match management.equipment.view(owner, target).await {
                    Ok(character) => {
                        let items = character.equipment().items(category).to_vec();
                        if items.is_empty() {
                            return Outcome::Done(Reply::text(format!(
                                "{} has no {}.",
                                target,
                                category.display_name().to_lowercase()
                            )));
                        }
                        let reply = prompt(&next).with_options(items);
                        Outcome::Next(
                            Session::Collecting {
                                target: target.clone(),
                                step: next,
                            },
                            reply,
                        )
                    }
                    Err(e) => Outcome::Done(error_reply(owner, &e)),
                }
            }

            Step::InventoryItem(action, category) => {
                let result = match action {
                    ListAction::Add => {
                        management
                            .equipment
                            .add_item(owner, target, *category, text)
                            .await
                    }
                    ListAction::Remove => {
                        management
                            .equipment
                            .remove_item(owner, target, *category, text)
                            .await
                    }
                };
                finish(owner, result, |character| render::equipment(&character))
            }

            Step::SpellSlots => {
                let counts = match parse_numbers::<u32>(text, "spellSlots") {
                    Ok(counts) => counts,
                    Err(e) => return Outcome::Retry(e.to_string()),
                };
                finish(
                    owner,
                    management.spells.set_slots(owner, target, &counts).await,
                    |character| render::spells(&character),
                )
            }

            Step::SpellKind(action) => {
                let Some(kind) = SpellKind::parse(text) else {
                    return Outcome::Retry("Please answer cantrip or spell.".into());
                };
                match (action, kind) {
                    (ListAction::Add, SpellKind::Spell) => collect(Step::SpellLevel),
                    (ListAction::Add, SpellKind::Cantrip) => collect(Step::SpellName {
                        action: ListAction::Add,
                        kind,
                        level: None,
                    }),
                    (ListAction::Remove, _) => self.offer_known_spells(owner, target, kind).await,
                }
            }

            Step::SpellLevel => match parse_numbers::<u8>(text, "level").as_deref() {
                Ok([level]) if (1..=MAX_SPELL_LEVEL).contains(level) => {
                    collect(Step::SpellName {
                        action: ListAction::Add,
                        kind: SpellKind::Spell,
                        level: Some(*level),
                    })
                }
                _ => Outcome::Retry("Spell level must be a number from 1 to 9.".into()),
            },

            Step::SpellName {
                action,
                kind,
                level,
            } => {
                let spells = &management.spells;
                match (action, kind) {
                    (ListAction::Add, SpellKind::Cantrip) => finish(
                        owner,
                        spells.add_cantrip(owner, target, text).await,
                        |(_, added)| added_message("Cantrip", text, added),
                    ),
                    (ListAction::Add, SpellKind::Spell) => {
                        let level = level.unwrap_or(1);
                        finish(
                            owner,
                            spells.add_spell(owner, target, text, level).await,
                            |(_, added)| {
                                added_message("Spell", &format!("{} ({})", text, level), added)
                            },
                        )
                    }
                    (ListAction::Remove, SpellKind::Cantrip) => finish(
                        owner,
                        spells.remove_cantrip(owner, target, text).await,
                        |(_, removed)| removed_message("Cantrip", text, removed),
                    ),
                    (ListAction::Remove, SpellKind::Spell) => {
                        let spell = match text.parse::<KnownSpell>() {
                            Ok(spell) => spell,
                            Err(e) => return Outcome::Retry(e.to_string()),
                        };
                        finish(
                            owner,
                            spells.remove_spell(owner, target, &spell).await,
                            |(_, removed)| removed_message("Spell", text, removed),
                        )
                    }
                }
            }

            Step::DescriptionText => {
                let sheet = &management.sheet;
                if text == "-" {
                    finish(
                        owner,
                        sheet.clear_description(owner, target).await,
                        |character| format!("Description of {} removed.", character.name()),
                    )
                } else {
                    finish(
                        owner,
                        sheet.set_description(owner, target, text).await,
                        |character| format!("Description of {} saved.", character.name()),
                    )
                }
            }
        }
    }

    async fn apply_stat(
        &self,
        owner: &OwnerId,
        target: &CharacterName,
        field: StatField,
        text: &str,
    ) -> Outcome {
        let sheet = &self.app.use_cases.management.sheet;
        let result = match field {
            StatField::Ability(ability) => match single::<i32>(text, "score") {
                Ok(score) => sheet.set_ability_score(owner, target, ability, score).await,
                Err(e) => return Outcome::Retry(e.to_string()),
            },
            StatField::ProficiencyBonus => match single::<u32>(text, "proficiencyBonus") {
                Ok(bonus) => sheet.set_proficiency_bonus(owner, target, bonus).await,
                Err(e) => return Outcome::Retry(e.to_string()),
            },
            StatField::ArmorClass => match single::<u32>(text, "armorClass") {
                Ok(ac) => sheet.set_armor_class(owner, target, ac).await,
                Err(e) => return Outcome::Retry(e.to_string()),
            },
            StatField::Level => match single::<i64>(text, "level") {
                Ok(level) => sheet.set_level(owner, target, level).await,
                Err(e) => return Outcome::Retry(e.to_string()),
            },
            StatField::HitPoints => match parse_numbers::<u32>(text, "hitPoints").as_deref() {
                Ok([max, current]) => sheet.set_hit_points(owner, target, *max, *current, 0).await,
                Ok([max, current, temporary]) => {
                    sheet
                        .set_hit_points(owner, target, *max, *current, *temporary)
                        .await
                }
                _ => {
                    return Outcome::Retry(
                        "Enter max and current hit points, optionally followed by temporary."
                            .into(),
                    )
                }
            },
            StatField::Speed => match parse_numbers::<u32>(text, "speed") {
                Ok(values) if (1..=5).contains(&values.len()) => {
                    let at = |i: usize| values.get(i).copied().unwrap_or(0);
                    let speed = Speed {
                        walk: at(0),
                        fly: at(1),
                        swim: at(2),
                        climb: at(3),
                        burrow: at(4),
                    };
                    sheet.set_speed(owner, target, speed).await
                }
                _ => return Outcome::Retry("Enter one to five speeds in feet.".into()),
            },
        };
        finish(owner, result, |character| render::sheet(&character))
    }

    async fn offer_known_spells(
        &self,
        owner: &OwnerId,
        target: &CharacterName,
        kind: SpellKind,
    ) -> Outcome {
        let character = match self.app.use_cases.management.roster.get(owner, target).await {
            Ok(character) => character,
            Err(e) => return Outcome::Done(error_reply(owner, &e)),
        };
        let record = character.spellcasting();
        let known: Vec<String> = match kind {
            SpellKind::Cantrip => record.cantrips().to_vec(),
            SpellKind::Spell => record.spells().iter().map(ToString::to_string).collect(),
        };
        if known.is_empty() {
            return Outcome::Done(Reply::text(format!("{} knows no {}s.", target, kind_label(kind))));
        }
        let step = Step::SpellName {
            action: ListAction::Remove,
            kind,
            level: None,
        };
        let reply = prompt(&step).with_options(known);
        Outcome::Next(
            Session::Collecting {
                target: target.clone(),
                step,
            },
            reply,
        )
    }
}

// =============================================================================
// Prompts and helpers
// =============================================================================

fn creation_prompt(step: CreationStep) -> Reply {
    match step {
        CreationStep::Name => Reply::text("What is your character's name? (2 to 30 characters)"),
        CreationStep::Race => Reply::text("Choose a race:")
            .with_options(Race::ALL.iter().map(ToString::to_string)),
        CreationStep::Class => Reply::text("Choose a class:")
            .with_options(CharacterClass::ALL.iter().map(ToString::to_string)),
        CreationStep::Level => Reply::text("What level is your character? (1 to 20)"),
        CreationStep::Abilities => Reply::text(
            "Enter six ability scores from 3 to 18, in order: \
             Strength, Dexterity, Constitution, Intelligence, Wisdom, Charisma.",
        ),
    }
}

fn prompt(step: &Step) -> Reply {
    match step {
        Step::ConfirmDelete => Reply::text("Delete this character?").with_options(["yes", "no"]),
        Step::SkillList { expertise } => Reply::text(format!(
            "Send skill names separated by commas to toggle {}.",
            if *expertise { "expertise" } else { "proficiency" }
        )),
        Step::AbilityList => Reply::text(
            "Send the abilities with saving throw proficiency, separated by commas, or 'none'.",
        )
        .with_options(Ability::ALL.iter().map(ToString::to_string)),
        Step::StatField => Reply::text("Which stat?").with_options(StatField::options()),
        Step::StatValue(field) => Reply::text(match field {
            StatField::Ability(ability) => format!("New {} score:", ability),
            StatField::ProficiencyBonus => "New proficiency bonus:".to_string(),
            StatField::HitPoints => "Max and current hit points, optionally temporary:".to_string(),
            StatField::ArmorClass => "New armor class:".to_string(),
            StatField::Speed => "Speeds in feet: walk, then optionally fly swim climb burrow:".to_string(),
            StatField::Level => "New level (1 to 20):".to_string(),
        }),
        Step::MoneyOperation => Reply::text("Add or spend coins?")
            .with_options(MoneyOperation::ALL.iter().map(ToString::to_string)),
        Step::MoneyAmounts(_) => Reply::text(
            "Enter four amounts separated by spaces: platinum gold silver copper.",
        ),
        Step::InventoryAction => {
            Reply::text("Add or remove an item?").with_options(ListAction::OPTIONS)
        }
        Step::InventoryCategory(_) => Reply::text("Which category?")
            .with_options(EquipmentCategory::ALL.iter().map(ToString::to_string)),
        Step::InventoryItem(_, _) => Reply::text("Item name:"),
        Step::SpellSlots => Reply::text(
            "Enter slot counts for levels 1 upward, separated by spaces (at most 9).",
        ),
        Step::SpellKind(_) => Reply::text("Cantrip or spell?").with_options(SpellKind::OPTIONS),
        Step::SpellLevel => Reply::text("Spell level (1 to 9):")
            .with_options((1..=9).map(|level: u8| level.to_string())),
        Step::SpellName { kind, .. } => Reply::text(format!("{} name:", capitalized(kind_label(*kind)))),
        Step::DescriptionText => {
            Reply::text("Send the new description, or '-' to remove the current one.")
        }
    }
}

/// Turn a use-case result into a final reply, keeping the step on rejected
/// input.
fn finish<T>(
    owner: &OwnerId,
    result: Result<T, ManagementError>,
    describe: impl FnOnce(T) -> String,
) -> Outcome {
    match result {
        Ok(value) => Outcome::Done(Reply::text(describe(value))),
        Err(ManagementError::Domain(e)) => Outcome::Retry(e.to_string()),
        Err(e) => Outcome::Done(error_reply(owner, &e)),
    }
}

/// Client-facing text for an error. Store details stay in the log.
fn error_reply(owner: &OwnerId, error: &ManagementError) -> Reply {
    match error {
        ManagementError::NotFound { id, .. } => {
            Reply::text(format!("You have no character named {}.", id))
        }
        ManagementError::Domain(e) => Reply::text(e.to_string()),
        ManagementError::PersistenceFailure(e) => {
            tracing::error!(%owner, error = %e, "Record store write failed");
            Reply::text("Could not save changes, nothing was modified. Please try again.")
        }
        ManagementError::Repo(e) => {
            tracing::error!(%owner, error = %e, "Record store read failed");
            Reply::text("Could not read your characters. Please try again.")
        }
    }
}

fn split_list(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_numbers<T: std::str::FromStr>(
    text: &str,
    field: &'static str,
) -> Result<Vec<T>, DomainError> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|_| DomainError::validation(field, format!("'{}' is not a valid number", token)))
        })
        .collect()
}

fn single<T: std::str::FromStr>(text: &str, field: &'static str) -> Result<T, DomainError> {
    let mut values = parse_numbers::<T>(text, field)?;
    match values.pop() {
        Some(value) if values.is_empty() => Ok(value),
        _ => Err(DomainError::validation(field, "expected one number")),
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn kind_label(kind: SpellKind) -> &'static str {
    match kind {
        SpellKind::Cantrip => "cantrip",
        SpellKind::Spell => "spell",
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn added_message(kind: &str, name: &str, added: bool) -> String {
    if added {
        format!("{} '{}' added.", kind, name.trim())
    } else {
        format!("{} '{}' is already known.", kind, name.trim())
    }
}

fn removed_message(kind: &str, name: &str, removed: bool) -> String {
    if removed {
        format!("{} '{}' removed.", kind, name.trim())
    } else {
        format!("{} '{}' was not known.", kind, name.trim())
    }
}
