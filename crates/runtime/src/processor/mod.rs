//! Encounter processor: the award cycle.
//!
//! One cycle runs per trigger:
//!
//! 1. Claim the encounter in the lock table (drop the trigger if claimed)
//! 2. Stop if the encounter's awarded flag is already set
//! 3. Extract players and defeated creatures, then merge banked creatures
//! 4. Compute the award with the configured strategy
//! 5. Apply it to each player independently; failures do not stop the rest
//! 6. Emit one summary notice (and an optional chat entry)
//! 7. Persist the awarded flag unless the trigger suppresses it
//!
//! The lock is a scoped guard, so it is released on every exit path.

mod locks;
mod report;

pub use locks::{ProcessingGuard, ProcessingLocks};
pub use report::{AwardReport, AwardTrigger, PlayerAward, PlayerFailure, ProcessOutcome};

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use xp_core::{
    Award, AwardInput, AwardSource, AwardStrategy, EncounterId, PlayerEntry, XpStrategy,
    extract_eligibility,
};

use crate::api::Result;
use crate::events::{EventBus, XpEvent};
use crate::notify::{Notice, Notifier};
use crate::repository::{ActorRepository, EncounterFlag, EncounterRepository, RepositoryError};

/// Runs award cycles against the host repositories.
pub struct EncounterProcessor {
    encounters: Arc<dyn EncounterRepository>,
    actors: Arc<dyn ActorRepository>,
    strategy: XpStrategy,
    notifier: Arc<dyn Notifier>,
    events: EventBus,
    chat_summary: bool,
    locks: ProcessingLocks,
}

impl EncounterProcessor {
    pub fn new(
        encounters: Arc<dyn EncounterRepository>,
        actors: Arc<dyn ActorRepository>,
        strategy: XpStrategy,
        notifier: Arc<dyn Notifier>,
        events: EventBus,
    ) -> Self {
        Self {
            encounters,
            actors,
            strategy,
            notifier,
            events,
            chat_summary: false,
            locks: ProcessingLocks::new(),
        }
    }

    /// Also post the award summary to chat.
    #[must_use]
    pub fn with_chat_summary(mut self, enabled: bool) -> Self {
        self.chat_summary = enabled;
        self
    }

    pub fn strategy(&self) -> &XpStrategy {
        &self.strategy
    }

    pub fn locks(&self) -> &ProcessingLocks {
        &self.locks
    }

    /// Runs one award cycle for `encounter`.
    ///
    /// Errors are only returned when the encounter itself cannot be read;
    /// player and flag write failures are logged and reported in the outcome.
    pub async fn process(
        &self,
        encounter: &EncounterId,
        trigger: AwardTrigger,
    ) -> Result<ProcessOutcome> {
        let Some(_guard) = self.locks.try_acquire(encounter) else {
            debug!(
                target: "xp_runtime::processor",
                encounter = %encounter,
                trigger = %trigger,
                "Award cycle already in flight, dropping trigger"
            );
            return Ok(ProcessOutcome::InFlight);
        };

        self.run(encounter, trigger).await
    }

    async fn run(&self, encounter: &EncounterId, trigger: AwardTrigger) -> Result<ProcessOutcome> {
        let flags = self.encounters.flags(encounter).await?;
        if flags.xp_awarded {
            debug!(
                target: "xp_runtime::processor",
                encounter = %encounter,
                "XP already awarded"
            );
            return Ok(ProcessOutcome::AlreadyAwarded);
        }

        let combatants = self.encounters.combatants(encounter).await?;
        let mut eligibility = extract_eligibility(&combatants);
        let banked = flags.banked_creatures.len();
        eligibility.merge_banked(flags.banked_creatures);

        let host_award = match self.encounters.host_award(encounter).await {
            Ok(award) => award,
            Err(e) => {
                warn!(
                    target: "xp_runtime::processor",
                    encounter = %encounter,
                    error = %e,
                    "Host award unavailable, using strategy"
                );
                None
            }
        };

        let input = AwardInput::new(&eligibility.players, &eligibility.defeated_creatures)
            .with_host_award(host_award);
        let award = self.strategy.compute_award(&input);

        info!(
            target: "xp_runtime::processor",
            encounter = %encounter,
            trigger = %trigger,
            strategy = self.strategy.name(),
            players = award.player_count,
            creatures = award.creature_count,
            banked,
            total_xp = award.total_xp,
            xp_per_character = award.xp_per_character,
            "Computed encounter award"
        );

        let mut recipients = Vec::new();
        let mut failures = Vec::new();
        if award.is_applicable() {
            for player in &eligibility.players {
                match self.apply_to_player(player, &award).await {
                    Ok(applied) => recipients.push(applied),
                    Err(e) => {
                        error!(
                            target: "xp_runtime::processor",
                            encounter = %encounter,
                            player = %player.actor,
                            error = %e,
                            "Failed to update player XP"
                        );
                        failures.push(PlayerFailure {
                            actor: player.actor.clone(),
                            name: player.name.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        self.notifier.notify(summary_notice(&award, &recipients, &failures));
        if self.chat_summary && award.is_applicable() {
            let party_level = award.party_level.unwrap_or(1);
            let lines: Vec<String> = eligibility
                .defeated_creatures
                .iter()
                .map(|c| self.strategy.describe_creature(c, party_level))
                .collect();
            self.notifier.notify(chat_notice(&award, &lines, &recipients));
        }

        let marked_processed = trigger.marks_processed() && self.mark_processed(encounter).await;

        let report = AwardReport {
            encounter: encounter.clone(),
            trigger,
            award,
            recipients,
            failures,
            marked_processed,
        };
        self.events.publish(XpEvent::Awarded(Box::new(report.clone())));

        Ok(ProcessOutcome::Completed(Box::new(report)))
    }

    async fn apply_to_player(
        &self,
        player: &PlayerEntry,
        award: &Award,
    ) -> std::result::Result<PlayerAward, RepositoryError> {
        let previous_xp = self.actors.experience(&player.actor).await?;
        let new_xp = self.strategy.apply_award(previous_xp, award);
        self.actors.set_experience(&player.actor, new_xp).await?;

        debug!(
            target: "xp_runtime::processor",
            player = %player.actor,
            previous_xp,
            new_xp,
            "Updated player XP"
        );

        Ok(PlayerAward {
            actor: player.actor.clone(),
            name: player.name.clone(),
            previous_xp,
            new_xp,
        })
    }

    async fn mark_processed(&self, encounter: &EncounterId) -> bool {
        match self
            .encounters
            .set_flag(encounter, EncounterFlag::XpAwarded(true))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(
                    target: "xp_runtime::processor",
                    encounter = %encounter,
                    error = %e,
                    "Failed to mark encounter as awarded"
                );
                false
            }
        }
    }
}

fn summary_notice(award: &Award, recipients: &[PlayerAward], failures: &[PlayerFailure]) -> Notice {
    if award.player_count == 0 {
        return Notice::Info("Combat complete. No player characters present; no XP awarded.".into());
    }
    if award.xp_per_character == 0 {
        return if award.creature_count > 0 {
            Notice::Warning(format!(
                "Combat complete, but {} defeated creature(s) were worth 0 XP.",
                award.creature_count
            ))
        } else {
            Notice::Info("Combat complete. No defeated creatures; no XP awarded.".into())
        };
    }

    let mut message = match award.source {
        AwardSource::Divided => format!(
            "Combat complete! {} XP awarded ({} XP per character).",
            award.total_xp, award.xp_per_character
        ),
        AwardSource::LevelTable | AwardSource::Host => format!(
            "Combat complete! {} XP awarded to each character.",
            award.xp_per_character
        ),
    };
    if failures.is_empty() {
        return Notice::Info(message);
    }

    let failed: Vec<&str> = failures.iter().map(|f| f.name.as_str()).collect();
    message.push_str(&format!(
        " Updated {} of {}; failed: {}.",
        recipients.len(),
        recipients.len() + failures.len(),
        failed.join(", ")
    ));
    Notice::Warning(message)
}

fn chat_notice(award: &Award, creature_lines: &[String], recipients: &[PlayerAward]) -> Notice {
    let mut message = format!("Encounter XP: {} per character", award.xp_per_character);
    if let Some(level) = award.party_level {
        message.push_str(&format!(" (party level {level})"));
    }
    for line in creature_lines {
        message.push_str("\n- ");
        message.push_str(line);
    }
    let names: Vec<&str> = recipients.iter().map(|r| r.name.as_str()).collect();
    message.push_str(&format!("\nAwarded to: {}", names.join(", ")));
    Notice::Chat(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::notify::TracingNotifier;
    use crate::repository::{InMemoryActorRepository, InMemoryEncounterRepository};
    use xp_core::{
        ActorData, ActorId, Combatant, CreatureSnapshot, Encounter, GameSystem, ShareRounding,
    };

    struct Fixture {
        encounters: Arc<InMemoryEncounterRepository>,
        actors: Arc<InMemoryActorRepository>,
        processor: EncounterProcessor,
    }

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<Notice>>);

    impl RecordingNotifier {
        fn notices(&self) -> Vec<Notice> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    fn fixture(system: GameSystem, encounter: Encounter) -> Fixture {
        fixture_with(system, encounter, Arc::new(TracingNotifier))
    }

    fn fixture_with(
        system: GameSystem,
        encounter: Encounter,
        notifier: Arc<dyn Notifier>,
    ) -> Fixture {
        let encounters = Arc::new(InMemoryEncounterRepository::with_encounters([encounter]));
        let actors = Arc::new(InMemoryActorRepository::with_actors([("pc1", 0), ("pc2", 100)]));
        let processor = EncounterProcessor::new(
            encounters.clone(),
            actors.clone(),
            XpStrategy::for_system(system, ShareRounding::Floor, true),
            notifier,
            EventBus::new(),
        );
        Fixture {
            encounters,
            actors,
            processor,
        }
    }

    fn party() -> Vec<Combatant> {
        vec![
            Combatant::new("c1", ActorData::character("pc1", "Amiri", 2)),
            Combatant::new("c2", ActorData::character("pc2", "Seoni", 2)),
        ]
    }

    fn id() -> EncounterId {
        EncounterId::new("enc")
    }

    #[tokio::test]
    async fn test_total_xp_split_and_marked() {
        let mut combatants = party();
        combatants.push(Combatant::new("m1", ActorData::npc("m1", "Wolf", 1).with_xp(30)).defeated());
        combatants.push(Combatant::new("m2", ActorData::npc("m2", "Bandit", 1).with_xp(41).with_hit_points(0)));
        let f = fixture(GameSystem::Dnd5e, Encounter::new("enc", combatants));

        let outcome = f.processor.process(&id(), AwardTrigger::Ended).await.unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.award.xp_per_character, 35);
        assert_eq!(report.applied_xp(), 70);
        assert!(report.marked_processed);

        let xp = f.actors.snapshot().unwrap();
        assert_eq!(xp[0].1, 35);
        assert_eq!(xp[1].1, 135);
        assert!(f.encounters.get(&id()).unwrap().unwrap().flags.xp_awarded);
    }

    #[tokio::test]
    async fn test_second_run_is_noop() {
        let mut combatants = party();
        combatants.push(Combatant::new("m1", ActorData::npc("m1", "Ogre", 3)).defeated());
        let f = fixture(GameSystem::Pf2e, Encounter::new("enc", combatants));

        let first = f.processor.process(&id(), AwardTrigger::Ended).await.unwrap();
        assert_eq!(first.report().unwrap().award.xp_per_character, 60);

        let second = f.processor.process(&id(), AwardTrigger::Completed).await.unwrap();
        assert_eq!(second, ProcessOutcome::AlreadyAwarded);
        assert_eq!(f.actors.snapshot().unwrap()[0].1, 60);
    }

    #[tokio::test]
    async fn test_banked_creatures_count() {
        let mut encounter = Encounter::new("enc", party());
        encounter.flags.banked_creatures.push(CreatureSnapshot::capture(
            &ActorData::npc("m9", "Fled Goblin", 2),
            "Fled Goblin",
        ));
        let f = fixture(GameSystem::Pf2e, encounter);

        let outcome = f.processor.process(&id(), AwardTrigger::Completed).await.unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.award.creature_count, 1);
        assert_eq!(report.award.xp_per_character, 40);
    }

    #[tokio::test]
    async fn test_deleted_trigger_does_not_mark() {
        let mut combatants = party();
        combatants.push(Combatant::new("m1", ActorData::npc("m1", "Ogre", 2)).defeated());
        let f = fixture(GameSystem::Pf2e, Encounter::new("enc", combatants));

        let outcome = f.processor.process(&id(), AwardTrigger::Deleted).await.unwrap();
        assert!(!outcome.report().unwrap().marked_processed);
        assert!(!f.encounters.get(&id()).unwrap().unwrap().flags.xp_awarded);
    }

    #[tokio::test]
    async fn test_no_players_still_marked() {
        let combatants = vec![Combatant::new("m1", ActorData::npc("m1", "Ogre", 2)).defeated()];
        let f = fixture(GameSystem::Pf2e, Encounter::new("enc", combatants));

        let outcome = f.processor.process(&id(), AwardTrigger::Ended).await.unwrap();
        let report = outcome.report().unwrap();
        assert!(report.recipients.is_empty());
        assert!(report.marked_processed);
        assert_eq!(f.actors.snapshot().unwrap(), vec![(ActorId::new("pc1"), 0), (ActorId::new("pc2"), 100)]);
    }

    #[tokio::test]
    async fn test_lock_released_after_error() {
        let f = fixture(GameSystem::Pf2e, Encounter::new("other", party()));

        let result = f.processor.process(&id(), AwardTrigger::Ended).await;
        assert!(result.is_err());
        assert!(!f.processor.locks().is_held(&id()));
    }

    #[tokio::test]
    async fn test_chat_summary_lists_creatures_and_recipients() {
        let mut combatants = party();
        combatants.push(Combatant::new("m1", ActorData::npc("m1", "Ogre", 4)).defeated());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut f = fixture_with(
            GameSystem::Pf2e,
            Encounter::new("enc", combatants),
            notifier.clone(),
        );
        f.processor = f.processor.with_chat_summary(true);

        f.processor.process(&id(), AwardTrigger::Ended).await.unwrap();

        assert_eq!(
            notifier.notices(),
            [
                Notice::Info("Combat complete! 80 XP awarded to each character.".into()),
                Notice::Chat(
                    "Encounter XP: 80 per character (party level 2)\n\
                     - Ogre (level 4, +2): 80 XP\n\
                     Awarded to: Amiri, Seoni"
                        .into()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_chat_entry_without_award() {
        let mut combatants = party();
        combatants.push(Combatant::new("m1", ActorData::npc("m1", "Rat", -3)).defeated());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut f = fixture_with(
            GameSystem::Pf2e,
            Encounter::new("enc", combatants),
            notifier.clone(),
        );
        f.processor = f.processor.with_chat_summary(true);

        f.processor.process(&id(), AwardTrigger::Ended).await.unwrap();

        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_warning());
    }

    #[test]
    fn test_summary_wording_per_scheme() {
        let mut award = Award {
            total_xp: 71,
            xp_per_character: 35,
            player_count: 2,
            creature_count: 2,
            party_level: None,
            source: AwardSource::Divided,
        };
        assert_eq!(
            summary_notice(&award, &[], &[]).message(),
            "Combat complete! 71 XP awarded (35 XP per character)."
        );

        award.total_xp = 35;
        award.source = AwardSource::Host;
        assert_eq!(
            summary_notice(&award, &[], &[]).message(),
            "Combat complete! 35 XP awarded to each character."
        );
    }

    #[test]
    fn test_summary_zero_xp_with_creatures_warns() {
        let award = Award {
            total_xp: 0,
            xp_per_character: 0,
            player_count: 2,
            creature_count: 1,
            party_level: Some(10),
            source: AwardSource::LevelTable,
        };
        assert!(summary_notice(&award, &[], &[]).is_warning());
    }
}
