//! Quest trigger propagation
//!
//! Re-evaluated after every flag change and on every day-start pipeline.
//! A pass unlocks quests whose unlock flag is set, completes objectives
//! whose condition holds, moves finished quests to the completed list and
//! applies their rewards once. Rewards may set flags, which marks the pass
//! dirty; the outer loop then runs another pass instead of recursing.

use crate::core::rng::RandomSource;
use crate::core::types::QuestId;
use crate::quests::quest::{PlayerGrant, Quest, QuestReward};
use crate::simulation::Campaign;
use crate::world::events::LogKind;

impl<R: RandomSource> Campaign<R> {
    pub(crate) fn evaluate_quests(&mut self) {
        if self.evaluating_quests {
            self.quests_dirty = true;
            return;
        }

        self.evaluating_quests = true;
        loop {
            self.quests_dirty = false;
            self.unlock_quests();
            for quest in self.advance_active_quests() {
                let (id, title, reward) =
                    (quest.id.clone(), quest.title.clone(), quest.reward.clone());
                self.world.completed_quests.push(quest);
                self.apply_reward(&id, &title, &reward);
            }
            if !self.quests_dirty {
                break;
            }
        }
        self.evaluating_quests = false;
    }

    fn unlock_quests(&mut self) {
        if self.world.locked_quests.is_empty() {
            return;
        }

        let locked = std::mem::take(&mut self.world.locked_quests);
        let (ready, still_locked): (Vec<Quest>, Vec<Quest>) =
            locked.into_iter().partition(|quest| {
                quest
                    .unlock_flag
                    .as_deref()
                    .map(|flag| self.world.flags.get(flag))
                    .unwrap_or(true)
            });
        self.world.locked_quests = still_locked;

        for quest in ready {
            tracing::info!("Quest {} started", quest.id);
            self.world.record(
                LogKind::QuestStarted {
                    quest: quest.id.clone(),
                },
                None,
                format!("New quest: {}", quest.title),
            );
            self.world.active_quests.push(quest);
        }
    }

    /// Advance every active quest; returns the ones that just finished
    fn advance_active_quests(&mut self) -> Vec<Quest> {
        let mut active = std::mem::take(&mut self.world.active_quests);
        let mut progress: Vec<(QuestId, String)> = Vec::new();
        for quest in &mut active {
            for objective in quest.advance(&self.world) {
                progress.push((quest.id.clone(), objective));
            }
        }

        let (finished, remaining): (Vec<Quest>, Vec<Quest>) = active
            .into_iter()
            .partition(|quest| quest.all_objectives_complete());
        self.world.active_quests = remaining;

        for (quest, objective) in progress {
            tracing::debug!("Objective {} of {} complete", objective, quest);
            self.world.record(
                LogKind::ObjectiveCompleted {
                    quest: quest.clone(),
                    objective: objective.clone(),
                },
                None,
                format!("Objective complete: {}", objective),
            );
        }

        finished
            .into_iter()
            .filter_map(|mut quest| quest.mark_completed().then_some(quest))
            .collect()
    }

    fn apply_reward(&mut self, quest: &QuestId, title: &str, reward: &QuestReward) {
        tracing::info!("Quest {} completed", quest);
        self.world.record(
            LogKind::QuestCompleted {
                quest: quest.clone(),
            },
            None,
            format!("Quest complete: {}", title),
        );

        for change in &reward.reputation {
            self.adjust_reputation(&change.region, change.delta);
        }
        if reward.balance != 0 {
            self.world.shift_balance(reward.balance);
        }
        if !reward.cards.is_empty() || reward.currency > 0 {
            self.world.push_grant(PlayerGrant {
                quest: quest.clone(),
                cards: reward.cards.clone(),
                currency: reward.currency,
            });
        }
        for flag in &reward.set_flags {
            self.set_flag(flag.clone(), true);
        }
        if reward.tension != 0 {
            self.change_tension(reward.tension);
        }
    }
}
