//! Merge module - the merge-collection progression game
//!
//! A 7x7 slot board of leveled items. Two items of equal kind and level
//! combine into one item a level higher; quests consume specific items for
//! coins and XP; episodes chain quests into a campaign. All transitions are
//! synchronous click handling, reported through [`MergeEvent`]s.

use crate::core::rng::SimpleRng;
use crate::types::{
    INITIAL_SPAWNS, MERGE_BOARD_SIZE, MERGE_XP_PER_LEVEL, QUEST_XP, START_COINS, START_ENERGY,
    XP_PER_LEVEL,
};

/// Kinds of mergeable items, each with its own level ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Clue,
    Gear,
    Snack,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Clue, ItemKind::Gear, ItemKind::Snack];

    pub fn max_level(self) -> u8 {
        self.glyphs().len() as u8
    }

    /// One glyph per level, level 1 first.
    pub fn glyphs(self) -> &'static [&'static str] {
        match self {
            ItemKind::Clue => &["🔦", "📻", "⛓️", "📛", "👮", "🚨", "📖", "📜"],
            ItemKind::Gear => &["🧱", "🔨", "🔧", "🚔", "🚁", "🏗️", "🤖"],
            ItemKind::Snack => &["🥕", "🍎", "🍩", "🍨", "🍰", "🥤"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Clue => "clue",
            ItemKind::Gear => "gear",
            ItemKind::Snack => "snack",
        }
    }
}

/// A leveled item occupying one board slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub level: u8,
}

impl Item {
    pub fn glyph(self) -> &'static str {
        self.kind.glyphs()[(self.level - 1) as usize]
    }
}

/// A quest: hand in one item of exactly this kind and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quest {
    pub id: &'static str,
    pub kind: ItemKind,
    pub level: u8,
    pub reward: u32,
    pub text: &'static str,
}

/// A chapter of the campaign: a title and its open quests.
#[derive(Debug, Clone)]
pub struct Episode {
    pub title: &'static str,
    pub quests: Vec<Quest>,
}

fn campaign() -> Vec<Episode> {
    vec![
        Episode {
            title: "Harbor Stakeout",
            quests: vec![
                Quest {
                    id: "q1",
                    kind: ItemKind::Clue,
                    level: 3,
                    reward: 100,
                    text: "Recover the smuggling ledger",
                },
                Quest {
                    id: "q2",
                    kind: ItemKind::Gear,
                    level: 2,
                    reward: 50,
                    text: "Repair the patrol radio",
                },
            ],
        },
        Episode {
            title: "Centennial Gala",
            quests: vec![
                Quest {
                    id: "q3",
                    kind: ItemKind::Clue,
                    level: 4,
                    reward: 200,
                    text: "Collect the shattered badge",
                },
                Quest {
                    id: "q4",
                    kind: ItemKind::Gear,
                    level: 3,
                    reward: 100,
                    text: "Fetch the repair toolkit",
                },
            ],
        },
        Episode {
            title: "Undercover Detail",
            quests: vec![
                Quest {
                    id: "q5",
                    kind: ItemKind::Gear,
                    level: 4,
                    reward: 300,
                    text: "Requisition an unmarked cruiser",
                },
                Quest {
                    id: "q6",
                    kind: ItemKind::Clue,
                    level: 5,
                    reward: 400,
                    text: "Secure the confidential report",
                },
            ],
        },
        Episode {
            title: "Rooftop Pursuit",
            quests: vec![
                Quest {
                    id: "q7",
                    kind: ItemKind::Snack,
                    level: 5,
                    reward: 500,
                    text: "Pack provisions for the chase",
                },
                Quest {
                    id: "q8",
                    kind: ItemKind::Gear,
                    level: 5,
                    reward: 600,
                    text: "Call in the chopper",
                },
            ],
        },
        Episode {
            title: "Case Closed",
            quests: vec![Quest {
                id: "q9",
                kind: ItemKind::Clue,
                level: 8,
                reward: 2000,
                text: "File the final dossier",
            }],
        },
    ]
}

/// Outcome notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEvent {
    Selected { slot: usize },
    Deselected,
    Moved { from: usize, to: usize },
    /// Two items combined into `item` at `slot`.
    Merged { slot: usize, item: Item, xp: u32 },
    Spawned { slot: usize, item: Item },
    OutOfEnergy,
    QuestCompleted { reward: u32 },
    /// Quest list emptied; call `advance_episode` after the display delay.
    EpisodeCleared,
    /// Campaign finished. Terminal, but not an error.
    AllEpisodesCleared,
    LevelUp { level: u32 },
}

/// One run of the merge game.
#[derive(Debug, Clone)]
pub struct MergeSession {
    slots: Vec<Option<Item>>,
    selected: Option<usize>,
    episodes: Vec<Episode>,
    episode_index: usize,
    energy: u32,
    coins: u32,
    xp: u32,
    level: u32,
    rng: SimpleRng,
    all_cleared: bool,
}

impl MergeSession {
    pub fn new(seed: u32) -> Self {
        let mut session = Self {
            slots: vec![None; MERGE_BOARD_SIZE * MERGE_BOARD_SIZE],
            selected: None,
            episodes: campaign(),
            episode_index: 0,
            energy: START_ENERGY,
            coins: START_COINS,
            xp: 0,
            level: 1,
            rng: SimpleRng::new(seed),
            all_cleared: false,
        };
        // The board opens with a few free items; these do not cost energy.
        for _ in 0..INITIAL_SPAWNS {
            session.spawn_into_empty_slot();
        }
        session
    }

    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn episode_index(&self) -> usize {
        self.episode_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        if self.all_cleared {
            None
        } else {
            self.episodes.get(self.episode_index)
        }
    }

    pub fn all_cleared(&self) -> bool {
        self.all_cleared
    }

    /// Spawn a level-1 item of a random kind into a random empty slot.
    /// Costs one energy; refused (with an advisory event) at zero.
    pub fn spawn(&mut self) -> Vec<MergeEvent> {
        if self.energy == 0 {
            return vec![MergeEvent::OutOfEnergy];
        }
        match self.spawn_into_empty_slot() {
            Some((slot, item)) => {
                self.energy -= 1;
                vec![MergeEvent::Spawned { slot, item }]
            }
            None => Vec::new(), // board full: silent, energy kept
        }
    }

    fn spawn_into_empty_slot(&mut self) -> Option<(usize, Item)> {
        let empty: Vec<usize> = (0..self.slots.len())
            .filter(|&i| self.slots[i].is_none())
            .collect();
        if empty.is_empty() {
            return None;
        }
        let slot = empty[self.rng.pick(empty.len())];
        let kind = ItemKind::ALL[self.rng.pick(ItemKind::ALL.len())];
        let item = Item { kind, level: 1 };
        self.slots[slot] = Some(item);
        Some((slot, item))
    }

    /// Handle a click on a board slot.
    ///
    /// With nothing selected, clicking an item selects it. Clicking the
    /// selection deselects. With a selection: an empty target moves the
    /// item; an equal kind-and-level target below its max merges into the
    /// target slot; anything else re-anchors the selection. Invalid merges
    /// never change the items themselves.
    pub fn click_slot(&mut self, index: usize) -> Vec<MergeEvent> {
        if index >= self.slots.len() {
            return Vec::new();
        }

        if self.selected == Some(index) {
            self.selected = None;
            return vec![MergeEvent::Deselected];
        }

        let Some(selected) = self.selected else {
            if self.slots[index].is_some() {
                self.selected = Some(index);
                return vec![MergeEvent::Selected { slot: index }];
            }
            return Vec::new();
        };

        let Some(source) = self.slots[selected] else {
            // Stale selection over an emptied slot; just re-anchor.
            self.selected = None;
            return self.click_slot(index);
        };

        match self.slots[index] {
            None => {
                self.slots[index] = Some(source);
                self.slots[selected] = None;
                self.selected = None;
                vec![MergeEvent::Moved {
                    from: selected,
                    to: index,
                }]
            }
            Some(target)
                if target.kind == source.kind
                    && target.level == source.level
                    && target.level < target.kind.max_level() =>
            {
                let merged = Item {
                    kind: target.kind,
                    level: target.level + 1,
                };
                self.slots[index] = Some(merged);
                self.slots[selected] = None;
                self.selected = None;

                let xp = MERGE_XP_PER_LEVEL * merged.level as u32;
                let mut events = vec![MergeEvent::Merged {
                    slot: index,
                    item: merged,
                    xp,
                }];
                events.extend(self.add_xp(xp));
                events
            }
            Some(_) => {
                // Mismatched kind/level or maxed out: reselect, items untouched.
                self.selected = Some(index);
                vec![MergeEvent::Selected { slot: index }]
            }
        }
    }

    /// Hand in a quest by id. Needs one board item of the exact kind and
    /// level; the item is consumed, coins and XP granted, the quest removed.
    /// Without a matching item, nothing changes and no events fire.
    pub fn complete_quest(&mut self, quest_id: &str) -> Vec<MergeEvent> {
        let Some(episode) = self.episodes.get_mut(self.episode_index) else {
            return Vec::new();
        };
        let Some(pos) = episode.quests.iter().position(|q| q.id == quest_id) else {
            return Vec::new();
        };
        let quest = episode.quests[pos];

        let Some(item_slot) = self
            .slots
            .iter()
            .position(|s| s.is_some_and(|i| i.kind == quest.kind && i.level == quest.level))
        else {
            return Vec::new();
        };

        self.slots[item_slot] = None;
        if self.selected == Some(item_slot) {
            self.selected = None;
        }
        self.coins += quest.reward;
        episode.quests.remove(pos);
        let episode_done = episode.quests.is_empty();

        let mut events = vec![MergeEvent::QuestCompleted {
            reward: quest.reward,
        }];
        events.extend(self.add_xp(QUEST_XP));
        if episode_done {
            events.push(MergeEvent::EpisodeCleared);
        }
        events
    }

    /// Move to the next episode after an `EpisodeCleared` event. The app
    /// layer calls this once its display delay has passed.
    pub fn advance_episode(&mut self) -> Vec<MergeEvent> {
        let Some(episode) = self.episodes.get(self.episode_index) else {
            return Vec::new();
        };
        if !episode.quests.is_empty() {
            return Vec::new();
        }
        self.episode_index += 1;
        if self.episode_index >= self.episodes.len() {
            self.all_cleared = true;
            vec![MergeEvent::AllEpisodesCleared]
        } else {
            Vec::new()
        }
    }

    /// Grant XP; every 100 XP wraps into a level-up, cascading through as
    /// many levels as the gain covers.
    fn add_xp(&mut self, amount: u32) -> Vec<MergeEvent> {
        self.xp += amount;
        let mut events = Vec::new();
        while self.xp >= XP_PER_LEVEL {
            self.level += 1;
            self.xp -= XP_PER_LEVEL;
            events.push(MergeEvent::LevelUp { level: self.level });
        }
        events
    }

    /// Put an item on the board directly (scenario setup and tests).
    pub fn set_slot(&mut self, index: usize, item: Option<Item>) {
        self.slots[index] = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemKind, level: u8) -> Item {
        Item { kind, level }
    }

    fn empty_session(seed: u32) -> MergeSession {
        let mut session = MergeSession::new(seed);
        for i in 0..session.slots.len() {
            session.set_slot(i, None);
        }
        session
    }

    #[test]
    fn test_new_session_has_initial_items_and_full_energy() {
        let session = MergeSession::new(1);
        let items = session.slots().iter().filter(|s| s.is_some()).count();
        assert_eq!(items, INITIAL_SPAWNS);
        assert_eq!(session.energy(), START_ENERGY);
        assert_eq!(session.coins(), START_COINS);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_merge_equal_items_levels_up_destination() {
        let mut session = empty_session(2);
        session.set_slot(0, Some(item(ItemKind::Gear, 2)));
        session.set_slot(5, Some(item(ItemKind::Gear, 2)));

        session.click_slot(0);
        let events = session.click_slot(5);

        assert!(matches!(
            events[0],
            MergeEvent::Merged {
                slot: 5,
                item: Item {
                    kind: ItemKind::Gear,
                    level: 3
                },
                xp: 30,
            }
        ));
        assert_eq!(session.slots()[0], None);
        assert_eq!(session.slots()[5], Some(item(ItemKind::Gear, 3)));
        assert_eq!(session.xp(), 30);
    }

    #[test]
    fn test_mismatch_reanchors_without_touching_items() {
        let mut session = empty_session(3);
        session.set_slot(0, Some(item(ItemKind::Clue, 1)));
        session.set_slot(1, Some(item(ItemKind::Gear, 1)));

        session.click_slot(0);
        let events = session.click_slot(1);
        assert_eq!(events, vec![MergeEvent::Selected { slot: 1 }]);
        assert_eq!(session.slots()[0], Some(item(ItemKind::Clue, 1)));
        assert_eq!(session.slots()[1], Some(item(ItemKind::Gear, 1)));
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_max_level_items_do_not_merge() {
        let mut session = empty_session(4);
        let max = ItemKind::Snack.max_level();
        session.set_slot(0, Some(item(ItemKind::Snack, max)));
        session.set_slot(1, Some(item(ItemKind::Snack, max)));

        session.click_slot(0);
        session.click_slot(1);
        assert_eq!(session.slots()[0], Some(item(ItemKind::Snack, max)));
        assert_eq!(session.slots()[1], Some(item(ItemKind::Snack, max)));
    }

    #[test]
    fn test_move_to_empty_slot() {
        let mut session = empty_session(5);
        session.set_slot(3, Some(item(ItemKind::Clue, 2)));
        session.click_slot(3);
        let events = session.click_slot(10);
        assert_eq!(events, vec![MergeEvent::Moved { from: 3, to: 10 }]);
        assert_eq!(session.slots()[3], None);
        assert_eq!(session.slots()[10], Some(item(ItemKind::Clue, 2)));
    }

    #[test]
    fn test_spawn_consumes_energy_and_blocks_at_zero() {
        let mut session = empty_session(6);
        let events = session.spawn();
        assert!(matches!(events[0], MergeEvent::Spawned { .. }));
        assert_eq!(session.energy(), START_ENERGY - 1);

        session.energy = 0;
        assert_eq!(session.spawn(), vec![MergeEvent::OutOfEnergy]);
    }

    #[test]
    fn test_spawned_items_are_level_one_real_kinds() {
        let mut session = empty_session(7);
        for _ in 0..20 {
            session.spawn();
        }
        for slot in session.slots().iter().flatten() {
            assert_eq!(slot.level, 1);
            assert!(ItemKind::ALL.contains(&slot.kind));
        }
    }

    #[test]
    fn test_quest_completion_consumes_item_and_rewards() {
        let mut session = empty_session(8);
        // q1 wants a level-3 clue.
        session.set_slot(0, Some(item(ItemKind::Clue, 3)));
        let coins_before = session.coins();

        let events = session.complete_quest("q1");
        assert!(matches!(events[0], MergeEvent::QuestCompleted { reward: 100 }));
        assert_eq!(session.slots()[0], None);
        assert_eq!(session.coins(), coins_before + 100);
        assert_eq!(session.xp(), QUEST_XP);
        assert_eq!(session.current_episode().unwrap().quests.len(), 1);
    }

    #[test]
    fn test_quest_without_matching_item_is_a_no_op() {
        let mut session = empty_session(9);
        session.set_slot(0, Some(item(ItemKind::Clue, 2))); // wrong level
        assert!(session.complete_quest("q1").is_empty());
        assert_eq!(session.slots()[0], Some(item(ItemKind::Clue, 2)));
    }

    #[test]
    fn test_episode_advances_when_quests_exhausted() {
        let mut session = empty_session(10);
        session.set_slot(0, Some(item(ItemKind::Clue, 3)));
        session.set_slot(1, Some(item(ItemKind::Gear, 2)));

        session.complete_quest("q1");
        let events = session.complete_quest("q2");
        assert!(events.contains(&MergeEvent::EpisodeCleared));

        session.advance_episode();
        assert_eq!(session.episode_index(), 1);
        assert_eq!(session.current_episode().unwrap().title, "Centennial Gala");
    }

    #[test]
    fn test_xp_cascades_through_multiple_levels() {
        let mut session = empty_session(11);
        let events = session.add_xp(250);
        assert_eq!(
            events,
            vec![MergeEvent::LevelUp { level: 2 }, MergeEvent::LevelUp { level: 3 }]
        );
        assert_eq!(session.xp(), 50);
        assert_eq!(session.level(), 3);
    }

    #[test]
    fn test_campaign_quests_are_reachable() {
        // Every quest level must be within its kind's ladder.
        for episode in campaign() {
            for quest in episode.quests {
                assert!(quest.level >= 1 && quest.level <= quest.kind.max_level());
            }
        }
    }
}
