//! Game session management.
//!
//! `GameSession` owns the player profile, the shop, the journal and at most
//! one running level. It interprets one line of player input at a time and
//! answers with a [`Reply`] the host prints after waiting out its delay.

use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nanti_mechanics::{
    Card, CardValue, Catalog, LevelOutcome, LevelSession, Reward, Step, Suit, Transition,
    TurnSummary,
};

use crate::config::GameConfig;
use crate::error::{SessionError, SessionResult};
use crate::journal::{Journal, JournalEntry};
use crate::mint::{RewardMinter, StubMinter};
use crate::profile::Profile;
use crate::shop::Shop;
use crate::store::{KeyValueStore, MemoryStore};

/// What a command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Text to show the player.
    pub text: String,
    /// How long to wait before showing it. The state has already changed.
    pub delay: Duration,
    /// Non-fatal problems, such as a failed save or mint.
    pub warnings: Vec<String>,
}

impl Reply {
    /// A reply with no delay and no warnings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// An interactive Lands of Nanti session.
pub struct GameSession {
    config: GameConfig,
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    minter: Box<dyn RewardMinter>,
    profile: Profile,
    shop: Shop,
    level: Option<LevelSession>,
    pending_reward: Option<Reward>,
    journal: Journal,
    rng: StdRng,
}

impl GameSession {
    /// Create a session, loading the profile and shop content from `store`.
    pub fn new(
        config: GameConfig,
        catalog: Catalog,
        store: Box<dyn KeyValueStore>,
        minter: Box<dyn RewardMinter>,
    ) -> SessionResult<Self> {
        catalog.validate()?;
        let profile = Profile::load_or_new(
            store.as_ref(),
            &config.player_name,
            config.starting_silver,
        )?;
        let shop = Shop::load(store.as_ref())?;
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            catalog,
            store,
            minter,
            profile,
            shop,
            level: None,
            pending_reward: None,
            journal: Journal::new(),
            rng,
        })
    }

    /// A throwaway session: preset catalog, in-memory store, stub minter.
    pub fn in_memory(config: GameConfig) -> SessionResult<Self> {
        Self::new(
            config,
            Catalog::default(),
            Box::new(MemoryStore::new()),
            Box::new(StubMinter::new()),
        )
    }

    /// Get the player profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Get the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the shop.
    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Get the journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Get the running level, if any.
    pub fn level(&self) -> Option<&LevelSession> {
        self.level.as_ref()
    }

    /// The reward waiting to be claimed, if any.
    pub fn pending_reward(&self) -> Option<&Reward> {
        self.pending_reward.as_ref()
    }

    /// Process a line of user input and return a reply.
    pub fn process(&mut self, input: &str) -> SessionResult<Reply> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Reply::default());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "levels" => self.do_levels(),
            "start" | "play" => self.do_start(rest),
            "die" => self.do_die(rest),
            "card" => self.do_card(rest),
            "draw" => self.do_draw(),
            "end" => self.do_end(),
            "status" | "hand" => self.do_status(),
            "claim" => self.do_claim(),
            "mint" => self.do_mint(),
            "leave" => self.do_leave(),
            "shop" => self.do_shop(),
            "buy" => self.do_buy(rest),
            "inventory" | "inv" => self.do_inventory(),
            "dice" => self.do_dice(rest),
            "equip" => self.do_equip(rest),
            "unequip" => self.do_unequip(rest),
            "profile" => self.do_profile(),
            "journal" => self.do_journal(),
            "help" => self.do_help(rest),
            "quit" | "q" => self.do_quit(),
            _ => Err(SessionError::UnknownCommand(cmd)),
        }
    }

    fn do_levels(&self) -> SessionResult<Reply> {
        let mut out = String::from("Levels:\n");
        for level in &self.catalog.levels {
            let state = if self.profile.completed_levels.contains(&level.id) {
                "done"
            } else if self.profile.is_level_unlocked(level.id) {
                "open"
            } else {
                "locked"
            };
            out.push_str(&format!(
                "  {:>2}. {:<22} {:>4} pts in {} turns  {}-{} silver  [{state}]\n",
                level.id,
                level.name,
                level.goal.points,
                level.goal.turns,
                level.rewards.silver_min,
                level.rewards.silver_max,
            ));
        }
        Ok(Reply::new(out.trim_end()))
    }

    fn do_start(&mut self, rest: &str) -> SessionResult<Reply> {
        let level_id: u32 = rest
            .parse()
            .map_err(|_| SessionError::InvalidChoice("usage: start <level>".to_string()))?;
        if let Some(level) = &self.level
            && !level.is_complete()
        {
            return Err(SessionError::InvalidChoice(
                "finish or leave the current level first".to_string(),
            ));
        }
        self.catalog.level(level_id)?;
        if !self.profile.is_level_unlocked(level_id) {
            return Err(SessionError::LevelLocked(level_id));
        }

        let mut reply = self.claim_leftover()?;
        let session = LevelSession::start(
            &self.catalog,
            level_id,
            &self.profile.inventory,
            self.config.level_rules(),
            &mut self.rng,
        )?;
        let level = session.level();
        self.journal.append(JournalEntry::LevelStarted {
            level_id,
            name: level.name.clone(),
            goal_points: level.goal.points,
            goal_turns: level.goal.turns,
            timestamp: Utc::now(),
        });

        let intro = format!(
            "== Level {}: {} ==\n{}\nGoal: {} points in {} turns.\n\n{}",
            level.id,
            level.name,
            level.lore,
            level.goal.points,
            level.goal.turns,
            render_turn(&session),
        );
        self.level = Some(session);
        push_text(&mut reply, &intro);
        Ok(reply)
    }

    fn do_die(&mut self, rest: &str) -> SessionResult<Reply> {
        let index = parse_position(rest, "usage: die <1|2>")?;
        let level = self.level.as_mut().ok_or(SessionError::NoActiveLevel)?;
        let transition = level.select_die(index, &mut self.rng)?;
        Ok(self.apply(transition))
    }

    fn do_card(&mut self, rest: &str) -> SessionResult<Reply> {
        let index = parse_position(rest, "usage: card <n>")?;
        let level = self.level.as_mut().ok_or(SessionError::NoActiveLevel)?;
        let transition = level.toggle_card(index)?;
        Ok(self.apply(transition))
    }

    fn do_draw(&mut self) -> SessionResult<Reply> {
        let level = self.level.as_mut().ok_or(SessionError::NoActiveLevel)?;
        let transition = level.draw_card(&mut self.rng)?;
        Ok(self.apply(transition))
    }

    fn do_end(&mut self) -> SessionResult<Reply> {
        let level = self.level.as_mut().ok_or(SessionError::NoActiveLevel)?;
        let transition = level.end_turn(&mut self.rng)?;
        Ok(self.apply(transition))
    }

    /// Journal and describe what an action did.
    fn apply(&mut self, transition: Transition) -> Reply {
        match transition.step {
            Step::Updated => Reply::new(self.render_level()),
            Step::NextTurn(summary) => {
                self.journal_turn(&summary);
                Reply::new(format!(
                    "{}\n\n{}",
                    describe_summary(&summary),
                    self.render_level()
                ))
                .delayed(transition.delay)
            }
            Step::Complete(summary, outcome) => {
                self.journal_turn(&summary);
                let mut reply = self.finish_level(outcome);
                reply.text = format!("{}\n\n{}", describe_summary(&summary), reply.text);
                reply.delayed(transition.delay)
            }
        }
    }

    fn finish_level(&mut self, outcome: LevelOutcome) -> Reply {
        let Some(level) = &self.level else {
            return Reply::default();
        };
        let level_id = level.level().id;
        let score = level.turn().total_score;
        let stats = level.stats().to_string();
        let victory = matches!(outcome, LevelOutcome::Victory(_));
        self.journal.append(JournalEntry::LevelEnded {
            level_id,
            victory,
            score,
            timestamp: Utc::now(),
        });

        match outcome {
            LevelOutcome::Victory(reward) => {
                self.profile.complete_level(level_id);
                let mut text = format!(
                    "Victory! {score} points.\n{stats}\nReward: {} silver",
                    reward.silver
                );
                if reward.gold_boosted {
                    text.push_str(" (gold bonus)");
                }
                if let Some(item) = &reward.special {
                    text.push_str(&format!(" and {item}"));
                }
                text.push_str(". Type `claim` to collect it.");
                self.pending_reward = Some(reward);
                let mut reply = Reply::new(text);
                self.save_into(&mut reply);
                reply
            }
            LevelOutcome::Defeat => Reply::new(format!(
                "Defeat. {score} points.\n{stats}\nType `start {level_id}` to try again."
            )),
        }
    }

    fn journal_turn(&mut self, summary: &TurnSummary) {
        let entry = match &summary.bust {
            Some(reason) => JournalEntry::Bust {
                turn: summary.turn,
                reason: reason.to_string(),
                timestamp: Utc::now(),
            },
            None => JournalEntry::TurnScored {
                turn: summary.turn,
                face: summary.face.unwrap_or_default(),
                cards: summary.cards.iter().map(Card::to_string).collect(),
                score: summary.score,
                total: self
                    .level
                    .as_ref()
                    .map(|l| l.turn().total_score)
                    .unwrap_or(summary.score),
                extra_turn: summary.extra_turn,
                timestamp: Utc::now(),
            },
        };
        self.journal.append(entry);
    }

    fn do_status(&self) -> SessionResult<Reply> {
        let level = self.level.as_ref().ok_or(SessionError::NoActiveLevel)?;
        Ok(Reply::new(render_turn(level)))
    }

    fn do_claim(&mut self) -> SessionResult<Reply> {
        let Some(reward) = self.pending_reward.take() else {
            let won = matches!(
                self.level.as_ref().and_then(LevelSession::outcome),
                Some(LevelOutcome::Victory(_))
            );
            if won {
                return Ok(Reply::new("That reward has already been claimed."));
            }
            return Err(SessionError::InvalidChoice(
                "there is no reward to claim".to_string(),
            ));
        };

        self.profile.earn(reward.silver);
        self.profile.complete_level(reward.level_id);
        self.journal.append(JournalEntry::RewardClaimed {
            level_id: reward.level_id,
            silver: reward.silver,
            special: reward.special.clone(),
            timestamp: Utc::now(),
        });
        tracing::info!(
            level = reward.level_id,
            silver = reward.silver,
            "claimed reward"
        );

        let mut reply = Reply::new(format!(
            "Claimed {} silver. You now have {} silver.",
            reward.silver, self.profile.silver
        ));
        if let Some(item) = &reward.special {
            self.attempt_mint(item, &mut reply);
        }
        self.save_into(&mut reply);
        Ok(reply)
    }

    fn do_mint(&mut self) -> SessionResult<Reply> {
        let item = self
            .profile
            .pending_mint
            .clone()
            .ok_or_else(|| SessionError::InvalidChoice("nothing is waiting to be minted".to_string()))?;
        let mut reply = Reply::default();
        self.attempt_mint(&item, &mut reply);
        self.save_into(&mut reply);
        Ok(reply)
    }

    /// Mint a special reward. Failure leaves it pending and never touches silver.
    fn attempt_mint(&mut self, item: &str, reply: &mut Reply) {
        let result = self
            .minter
            .mint_special_reward(self.profile.wallet.as_deref(), item);
        let (success, detail) = match result {
            Ok(()) => {
                self.profile.pending_mint = None;
                self.profile.minted.push(item.to_string());
                push_text(reply, &format!("{item} has been minted."));
                (true, None)
            }
            Err(e) => {
                tracing::warn!(item, error = %e, "mint failed");
                self.profile.pending_mint = Some(item.to_string());
                reply.warnings.push(format!("{e}; type `mint` to retry"));
                (false, Some(e.to_string()))
            }
        };
        self.journal.append(JournalEntry::Mint {
            item: item.to_string(),
            success,
            detail,
            timestamp: Utc::now(),
        });
    }

    fn do_leave(&mut self) -> SessionResult<Reply> {
        let level = self.level.take().ok_or(SessionError::NoActiveLevel)?;
        if !level.is_complete() {
            self.journal.append(JournalEntry::LevelLeft {
                level_id: level.level().id,
                turn: level.turn().turn,
                timestamp: Utc::now(),
            });
            tracing::info!(level = level.level().id, "left level");
        }
        let mut reply = self.claim_leftover()?;
        push_text(&mut reply, &format!("You leave {}.", level.level().name));
        Ok(reply)
    }

    fn do_quit(&mut self) -> SessionResult<Reply> {
        let mut reply = self.claim_leftover()?;
        push_text(&mut reply, "Farewell, wanderer.");
        Ok(reply)
    }

    /// Claim a reward the player walked away from.
    fn claim_leftover(&mut self) -> SessionResult<Reply> {
        if self.pending_reward.is_some() {
            self.do_claim()
        } else {
            Ok(Reply::default())
        }
    }

    fn do_shop(&self) -> SessionResult<Reply> {
        let mut out = format!("Shop (you have {} silver):\n", self.profile.silver);
        for item in self.shop.items() {
            let owned = if Shop::is_owned(item, &self.profile) {
                " [owned]"
            } else {
                ""
            };
            out.push_str(&format!(
                "  {:<22} {:<18} {:>4} silver  {:<9} {}{owned}\n",
                item.id,
                item.name,
                item.price,
                item.rarity,
                item.kind_label(),
            ));
        }
        Ok(Reply::new(out.trim_end()))
    }

    fn do_buy(&mut self, id: &str) -> SessionResult<Reply> {
        if id.is_empty() {
            return Err(SessionError::InvalidChoice("usage: buy <item id>".to_string()));
        }
        let item = self.shop.purchase(id, &mut self.profile)?;
        self.journal.append(JournalEntry::Purchase {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            timestamp: Utc::now(),
        });
        let mut reply = Reply::new(format!(
            "Bought {} for {} silver. {} silver left.",
            item.name, item.price, self.profile.silver
        ));
        self.save_into(&mut reply);
        Ok(reply)
    }

    fn do_inventory(&self) -> SessionResult<Reply> {
        let inv = &self.profile.inventory;
        let active: Vec<String> = inv.active_dice().into_iter().map(|d| d.id).collect();
        let mut out = format!("Silver: {}\n\nDice:\n", self.profile.silver);
        for die in inv.dice() {
            let mark = if active.contains(&die.id) { "*" } else { " " };
            out.push_str(&format!("  {mark} {:<18} {die}\n", die.id));
        }
        out.push_str("\nCards:\n");
        if inv.cards().is_empty() {
            out.push_str("  (none)\n");
        }
        for card in inv.cards() {
            let mark = if inv.is_equipped(&card.id) { "*" } else { " " };
            out.push_str(&format!("  {mark} {:<22} {} {card}\n", card.id, card.name));
        }
        out.push_str("\n* active / equipped");
        Ok(Reply::new(out))
    }

    fn do_dice(&mut self, rest: &str) -> SessionResult<Reply> {
        let ids: Vec<&str> = rest.split_whitespace().collect();
        if ids.is_empty() {
            return Err(SessionError::InvalidChoice(
                "usage: dice <id> <id> [...]".to_string(),
            ));
        }
        self.profile.inventory.select_dice(&ids)?;
        let mut reply = Reply::new(format!("Active dice: {}.", ids.join(", ")));
        self.save_into(&mut reply);
        Ok(reply)
    }

    fn do_equip(&mut self, id: &str) -> SessionResult<Reply> {
        if id.is_empty() {
            return Err(SessionError::InvalidChoice("usage: equip <card id>".to_string()));
        }
        let displaced = self.profile.inventory.equip_card(id)?;
        let mut text = format!("Equipped {id}.");
        if let Some(old) = displaced {
            text.push_str(&format!(" {old} returned to your collection."));
        }
        let mut reply = Reply::new(text);
        self.save_into(&mut reply);
        Ok(reply)
    }

    fn do_unequip(&mut self, rest: &str) -> SessionResult<Reply> {
        let equipped = self
            .profile
            .inventory
            .equipped_cards()
            .into_iter()
            .find(|c| c.id == rest)
            .map(Card::slot);
        let (value, suit) = match equipped {
            Some(slot) => slot,
            None => parse_slot(rest)?,
        };
        let removed = self.profile.inventory.reset_slot(value, suit).ok_or_else(|| {
            SessionError::InvalidChoice(format!(
                "the {value}{} slot already holds the standard card",
                suit.symbol()
            ))
        })?;
        let mut reply = Reply::new(format!(
            "Unequipped {removed}; the {value}{} slot is standard again.",
            suit.symbol()
        ));
        self.save_into(&mut reply);
        Ok(reply)
    }

    fn do_profile(&self) -> SessionResult<Reply> {
        let p = &self.profile;
        let completed: Vec<String> = p.completed_levels.iter().map(u32::to_string).collect();
        let mut out = format!(
            "Name: {}\nWallet: {}\nSilver: {}\nCompleted levels: {}\nDice owned: {}\nCards owned: {}",
            p.name,
            p.wallet.as_deref().unwrap_or("(not connected)"),
            p.silver,
            if completed.is_empty() {
                "none".to_string()
            } else {
                completed.join(", ")
            },
            p.inventory.dice().len(),
            p.inventory.cards().len(),
        );
        if !p.minted.is_empty() {
            out.push_str(&format!("\nMinted: {}", p.minted.join(", ")));
        }
        if let Some(item) = &p.pending_mint {
            out.push_str(&format!("\nWaiting to mint: {item} (type `mint` to retry)"));
        }
        Ok(Reply::new(out))
    }

    fn do_journal(&self) -> SessionResult<Reply> {
        if self.journal.is_empty() {
            return Ok(Reply::new("Journal is empty."));
        }
        Ok(Reply::new(self.journal.export_text().trim_end()))
    }

    fn do_help(&self, topic: &str) -> SessionResult<Reply> {
        let text = match topic.to_lowercase().as_str() {
            "play" | "turn" => "\
Turn Commands:
  die <1|2>                     Choose a die (again to deselect)
  card <n>                      Select or deselect card n
  draw                          Draw one extra card (a miss busts the turn)
  end                           Bank the selected cards and end the turn
  status                        Show the table

Each die face accepts certain card values. Aces and cards of one suit
multiply the score.",
            "shop" | "inventory" => "\
Shop Commands:
  shop                          List items for sale
  buy <id>                      Buy an item
  inventory                     Show owned dice and cards
  dice <id> <id> [...]          Choose 2 to 5 active dice
  equip <card id>               Put a card into its deck slot
  unequip <card id|value suit>  Return a slot to the standard card",
            _ => "\
Lands of Nanti Commands:
  levels                        List levels
  start <level>                 Start a level
  die, card, draw, end          Play a turn (help play)
  status                        Show the table
  claim                         Collect a victory reward
  mint                          Retry a failed special reward mint
  leave                         Leave the current level
  shop, buy, inventory          Spend silver (help shop)
  dice, equip, unequip          Set up dice and deck
  profile                       Show your profile
  journal                       Show the session journal
  help [topic]                  Show help (play, shop)
  quit                          Exit",
        };
        Ok(Reply::new(text))
    }

    fn render_level(&self) -> String {
        match &self.level {
            Some(level) => render_turn(level),
            None => "No level in progress.".to_string(),
        }
    }

    fn save_into(&mut self, reply: &mut Reply) {
        if let Err(e) = self.profile.save(self.store.as_mut()) {
            tracing::warn!(error = %e, "could not save profile");
            reply.warnings.push(format!("progress not saved: {e}"));
        }
    }
}

/// Draw the table: score line, dice, and hand.
pub fn render_turn(level: &LevelSession) -> String {
    let turn = level.turn();
    let goal = &level.level().goal;
    let mut out = format!(
        "Turn {}/{}  Score {}/{}\nDice:",
        turn.turn, goal.turns, turn.total_score, goal.points
    );
    for (i, rolled) in turn.dice.iter().enumerate() {
        let mark = if turn.selected_die == Some(i) { "*" } else { "" };
        out.push_str(&format!("  [{}] {}{mark} ({})", i + 1, rolled.face, rolled.die));
    }
    out.push_str("\nHand:");
    for (i, dealt) in turn.hand.iter().enumerate() {
        let validity = match dealt.valid {
            Some(true) if turn.is_selected(i) => "selected",
            Some(true) => "playable",
            Some(false) => "no match",
            None => "",
        };
        let label = dealt.card.to_string();
        out.push_str(&format!("\n  {}. {label:<24} {validity}", i + 1));
    }
    if turn.face().is_some() {
        out.push_str(&format!("\nTurn score: {}", turn.turn_score));
    }
    if let Some(outcome) = level.outcome() {
        out.push_str(match outcome {
            LevelOutcome::Victory(_) => "\nThe level is won.",
            LevelOutcome::Defeat => "\nThe level is lost.",
        });
    }
    out.trim_end().to_string()
}

fn describe_summary(summary: &TurnSummary) -> String {
    match &summary.bust {
        Some(reason) => format!("Turn {} busts: {reason}.", summary.turn),
        None => {
            let cards: Vec<String> = summary.cards.iter().map(Card::to_string).collect();
            let mut out = format!(
                "Turn {} scores {} with [{}].",
                summary.turn,
                summary.score,
                cards.join(", ")
            );
            if summary.extra_turn {
                out.push_str(" Extra turn!");
            }
            out
        }
    }
}

fn push_text(reply: &mut Reply, text: &str) {
    if !reply.text.is_empty() {
        reply.text.push_str("\n\n");
    }
    reply.text.push_str(text);
}

/// Parse a 1-based position into an index.
fn parse_position(input: &str, usage: &str) -> SessionResult<usize> {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| SessionError::InvalidChoice(usage.to_string()))
}

/// Parse `<value> <suit>`, e.g. `Q hearts`.
fn parse_slot(input: &str) -> SessionResult<(CardValue, Suit)> {
    let usage = || SessionError::InvalidChoice("usage: unequip <card id|value suit>".to_string());
    let mut words = input.split_whitespace();
    let value = words.next().and_then(CardValue::parse).ok_or_else(usage)?;
    let suit = words.next().and_then(Suit::parse).ok_or_else(usage)?;
    Ok((value, suit))
}
