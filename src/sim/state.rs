//! Game state and core simulation types
//!
//! Everything the tick engine mutates lives in `GameState`; collaborators read
//! it (or a `RenderSnapshot`) and never write.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::{BlockType, generate_base};
use super::tutorial::TutorialTargets;
use super::world::{ChunkManager, WorldMap};
use crate::config::SessionConfig;
use crate::consts::*;
use crate::tuning::{LevelConfig, level_config};

/// Coarse engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Terminal
    GameOver,
}

/// Grid heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step (y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Turns tried first when recovering from a stun
    pub fn perpendicular(&self) -> [Direction; 2] {
        if self.is_vertical() {
            [Direction::Right, Direction::Left]
        } else {
            [Direction::Down, Direction::Up]
        }
    }
}

/// Active power-up (at most one at a time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerUpType {
    #[default]
    None,
    LaserEyes,
    GhostShield,
    TimeFreeze,
    SpeedBoost,
    /// Instant, never becomes the active power
    Heal,
    EchoBomb,
    FuryClaws,
    DragonHeart,
    ThunderMind,
    MistWings,
    ShadowTrace,
    LunarHarvest,
    PhoenixEye,
}

impl PowerUpType {
    /// Everything a POWERUP_BOX can roll
    pub const CATALOG: [PowerUpType; 13] = [
        PowerUpType::LaserEyes,
        PowerUpType::GhostShield,
        PowerUpType::TimeFreeze,
        PowerUpType::SpeedBoost,
        PowerUpType::Heal,
        PowerUpType::EchoBomb,
        PowerUpType::FuryClaws,
        PowerUpType::DragonHeart,
        PowerUpType::ThunderMind,
        PowerUpType::MistWings,
        PowerUpType::ShadowTrace,
        PowerUpType::LunarHarvest,
        PowerUpType::PhoenixEye,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpType::None => "NONE",
            PowerUpType::LaserEyes => "LASER_EYES",
            PowerUpType::GhostShield => "GHOST_SHIELD",
            PowerUpType::TimeFreeze => "TIME_FREEZE",
            PowerUpType::SpeedBoost => "SPEED_BOOST",
            PowerUpType::Heal => "HEAL",
            PowerUpType::EchoBomb => "ECHO_BOMB",
            PowerUpType::FuryClaws => "FURY_CLAWS",
            PowerUpType::DragonHeart => "DRAGON_HEART",
            PowerUpType::ThunderMind => "THUNDER_MIND",
            PowerUpType::MistWings => "MIST_WINGS",
            PowerUpType::ShadowTrace => "SHADOW_TRACE",
            PowerUpType::LunarHarvest => "LUNAR_HARVEST",
            PowerUpType::PhoenixEye => "PHOENIX_EYE",
        }
    }
}

/// The player's snake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Segments, head first
    pub body: VecDeque<IVec2>,
    /// Body as it was before the last committed move (for interpolation)
    #[serde(default)]
    pub prev_body: Vec<IVec2>,
    pub direction: Direction,
    /// Pickups accumulated toward the next segment
    pub growth_bucket: u32,
}

impl Snake {
    /// Straight snake with its tail trailing away from `direction`
    pub fn new(head: IVec2, direction: Direction, length: usize) -> Self {
        let step = direction.opposite().delta();
        let body: VecDeque<IVec2> = (0..length.max(1) as i32).map(|i| head + step * i).collect();
        let prev_body = body.iter().copied().collect();
        Self {
            body,
            prev_body,
            direction,
            growth_bucket: 0,
        }
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or(IVec2::ZERO)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Would moving the head onto `cell` hit the body? The tail is about to
    /// move away unless the snake grows this tick.
    pub fn hits_body(&self, cell: IVec2, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(checked).any(|&s| s == cell)
    }

    /// Commit a move to `new_head`, keeping the tail when growing
    pub fn advance(&mut self, new_head: IVec2, grow: bool) {
        self.prev_body.clear();
        self.prev_body.extend(self.body.iter().copied());
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Drop one tail segment if longer than `min_len`
    pub fn shrink(&mut self, min_len: usize) -> bool {
        if self.body.len() > min_len {
            self.body.pop_back();
            true
        } else {
            false
        }
    }

    /// Keep interpolation still for a tick where the head did not move
    pub fn hold(&mut self) {
        self.prev_body.clear();
        self.prev_body.extend(self.body.iter().copied());
    }
}

/// Boss archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    Golem,
    CyberWorm,
    PumpkinKing,
    Shadow,
    Phoenix,
}

impl BossKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BossKind::Golem => "GOLEM",
            BossKind::CyberWorm => "CYBER_WORM",
            BossKind::PumpkinKing => "PUMPKIN_KING",
            BossKind::Shadow => "SHADOW",
            BossKind::Phoenix => "PHOENIX",
        }
    }

    /// Scales the base projectile damage
    pub fn projectile_factor(&self) -> f32 {
        match self {
            BossKind::Golem => 1.25,
            BossKind::CyberWorm => 1.5,
            BossKind::PumpkinKing => 1.75,
            BossKind::Shadow => 1.0,
            BossKind::Phoenix => 0.75,
        }
    }

    /// Projectile speed in cells per tick
    pub fn projectile_speed(&self) -> f32 {
        match self {
            BossKind::Golem => 0.35,
            BossKind::CyberWorm => 0.5,
            BossKind::PumpkinKing => 0.4,
            BossKind::Shadow => 0.55,
            BossKind::Phoenix => 0.45,
        }
    }

    /// Ticks between movement steps
    pub fn move_interval(&self, enraged: bool) -> u32 {
        let base: u32 = if enraged { 8 } else { 15 };
        match self {
            BossKind::Golem | BossKind::PumpkinKing => base,
            BossKind::CyberWorm => base - 2,
            BossKind::Shadow => base - 3,
            BossKind::Phoenix => base - 1,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            BossKind::Golem => 0x8d6e63,
            BossKind::CyberWorm => 0x00e5ff,
            BossKind::PumpkinKing => 0xff9800,
            BossKind::Shadow => 0x7e57c2,
            BossKind::Phoenix => 0xff5722,
        }
    }
}

/// Boss attack state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Waiting to roll the next attack
    Idle,
    /// Set for the tick an attack fires
    Attack,
    Cooldown,
    /// Winding up an area burst
    Charging,
}

/// The (at most one) active boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub pos: IVec2,
    /// Smoothed render position, eased toward `pos` every tick
    #[serde(skip)]
    pub visual_pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub phase: BossPhase,
    /// Ticks until the next attack roll (or until a charge bursts)
    pub attack_timer: u32,
    pub damage_multiplier: f32,
}

impl Boss {
    pub fn new(kind: BossKind, pos: IVec2, max_hp: i32, damage_multiplier: f32) -> Self {
        Self {
            kind,
            pos,
            visual_pos: pos.as_vec2(),
            hp: max_hp,
            max_hp,
            phase: BossPhase::Idle,
            attack_timer: 50,
            damage_multiplier,
        }
    }

    /// Below half health
    pub fn is_enraged(&self) -> bool {
        self.hp * 2 < self.max_hp
    }
}

/// Boss shot (continuous position, cells per tick)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub damage: i32,
    pub color: u32,
}

/// Expanding circular hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AoeZone {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth: f32,
    pub damage: i32,
    pub opacity: f32,
    pub color: u32,
}

/// Laser beam, drawn for a few ticks then gone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub from: Vec2,
    pub to: Vec2,
    pub life: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Semantic events for audio and the session host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Eat,
    Break,
    Damage,
    PowerUp(PowerUpType),
    BossHit,
    Laser,
    BossSpawn(BossKind),
    BossDefeated { bonus: u64 },
    LevelUp(u32),
    GameOver { score: u64 },
}

impl GameEvent {
    /// Fire-and-forget name for the audio layer
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Eat => "EAT",
            GameEvent::Break => "BREAK",
            GameEvent::Damage => "DAMAGE",
            GameEvent::PowerUp(_) => "POWERUP",
            GameEvent::BossHit => "BOSS_HIT",
            GameEvent::Laser => "LASER",
            GameEvent::BossSpawn(_) => "BOSS_SPAWN",
            GameEvent::BossDefeated { .. } => "BOSS_DEFEATED",
            GameEvent::LevelUp(_) => "LEVEL_UP",
            GameEvent::GameOver { .. } => "GAME_OVER",
        }
    }
}

/// Complete simulation state (owned by the tick engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Read-only session bundle
    pub config: SessionConfig,
    pub tutorial: bool,
    pub level: u32,
    pub level_config: LevelConfig,
    pub phase: GamePhase,
    /// False until the first direction input (tutorial only)
    pub started: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated milliseconds (sum of tick intervals)
    pub time_ms: u64,

    pub score: u64,
    /// Score when the current level began
    pub level_score_base: u64,
    pub health: i32,
    pub combo: u32,
    pub combo_timer: u32,

    pub snake: Snake,
    /// Pending direction changes (FIFO, at most `INPUT_QUEUE_DEPTH`)
    pub input_queue: VecDeque<Direction>,
    /// Set by a wall bounce, cleared by the recovery turn
    pub stunned: bool,

    pub active_power: PowerUpType,
    pub power_timer: u32,
    pub burn_ticks: u32,
    pub score_booster_ticks: u32,
    pub laser_cooldown: u32,

    pub boss: Option<Boss>,
    pub bosses_defeated: u32,
    pub projectiles: Vec<Projectile>,
    pub aoe_zones: Vec<AoeZone>,
    #[serde(skip)]
    pub beams: Vec<Beam>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,

    /// Mutated cells on top of the generator
    pub world: WorldMap,
    pub chunks: ChunkManager,

    pub tutorial_step: u8,
    /// Cells the tutorial step is waiting on
    pub tutorial_targets: TutorialTargets,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh run for a session bundle
    pub fn new(config: SessionConfig) -> Self {
        Self::with_chunks(config, ChunkManager::default())
    }

    /// Fresh run whose chunk manager pre-generates terrain for snapshots
    pub fn with_pregenerated_chunks(config: SessionConfig) -> Self {
        Self::with_chunks(config, ChunkManager::new(true))
    }

    fn with_chunks(config: SessionConfig, chunks: ChunkManager) -> Self {
        let level = config.level.max(1);
        let tutorial = config.tutorial;
        let snake = Snake::new(IVec2::ZERO, Direction::Right, config.start_length());

        let mut state = Self {
            seed: config.seed,
            rng: Pcg32::seed_from_u64(config.seed),
            tutorial,
            level,
            level_config: level_config(level),
            phase: GamePhase::Playing,
            started: !tutorial,
            time_ticks: 0,
            time_ms: 0,
            score: 0,
            level_score_base: 0,
            health: INITIAL_HEALTH,
            combo: 0,
            combo_timer: 0,
            snake,
            input_queue: VecDeque::with_capacity(INPUT_QUEUE_DEPTH),
            stunned: false,
            active_power: PowerUpType::None,
            power_timer: 0,
            burn_ticks: 0,
            score_booster_ticks: config.score_booster_ticks(),
            laser_cooldown: 0,
            boss: None,
            bosses_defeated: 0,
            projectiles: Vec::new(),
            aoe_zones: Vec::new(),
            beams: Vec::new(),
            particles: Vec::new(),
            world: WorldMap::default(),
            chunks,
            tutorial_step: 0,
            tutorial_targets: TutorialTargets::default(),
            events: Vec::new(),
            next_id: 1,
            config,
        };

        let head = state.snake.head();
        state.chunks.update(head, 0, level, tutorial);
        log::info!(
            "New run: level {} ({}), tutorial {}, seed {}",
            level,
            state.level_config.name,
            tutorial,
            state.seed
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Block at `cell`: overlay, then pre-generated chunk, then the generator
    pub fn block_at(&self, cell: IVec2) -> BlockType {
        if let Some(block) = self.world.get(cell) {
            return block;
        }
        self.chunks
            .cached_base(cell, self.level)
            .unwrap_or_else(|| generate_base(cell, self.level, self.tutorial))
    }

    pub fn set_block(&mut self, cell: IVec2, block: BlockType) {
        self.world.set(cell, block);
    }

    /// Make a cell EMPTY, dropping the override when the generator already
    /// agrees so the overlay only holds real divergences
    pub fn clear_cell(&mut self, cell: IVec2) {
        if generate_base(cell, self.level, self.tutorial) == BlockType::Empty {
            self.world.remove(cell);
        } else {
            self.world.set(cell, BlockType::Empty);
        }
    }

    pub fn is_walkable(&self, cell: IVec2) -> bool {
        !self.block_at(cell).is_solid()
    }

    /// Score earned since the current level began
    pub fn level_score(&self) -> u64 {
        self.score.saturating_sub(self.level_score_base)
    }

    pub fn has_power(&self, power: PowerUpType) -> bool {
        self.active_power == power
    }

    /// Last intended heading: the queued tail, else the current heading
    pub fn intended_direction(&self) -> Direction {
        self.input_queue
            .back()
            .copied()
            .unwrap_or(self.snake.direction)
    }

    /// Buffer a direction intent. Same or reversed headings are dropped, as
    /// are intents beyond the queue depth. Returns whether it was queued.
    pub fn register_direction(&mut self, dir: Direction) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let last = self.intended_direction();
        if dir == last || dir == last.opposite() {
            return false;
        }
        if self.input_queue.len() >= INPUT_QUEUE_DEPTH {
            return false;
        }
        self.input_queue.push_back(dir);
        self.started = true;
        true
    }

    /// Hurt the player. The tutorial takes no damage and THUNDER_MIND soaks
    /// one hit before expiring. Returns the damage actually dealt.
    pub fn damage_player(&mut self, amount: i32) -> i32 {
        if self.tutorial || amount <= 0 || self.phase == GamePhase::GameOver {
            return 0;
        }
        if self.active_power == PowerUpType::ThunderMind {
            log::debug!("THUNDER_MIND absorbed {} damage", amount);
            self.active_power = PowerUpType::None;
            self.power_timer = 0;
            return 0;
        }
        self.health -= amount;
        self.push_event(GameEvent::Damage);
        amount
    }

    /// Restore health up to the cap
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(INITIAL_HEALTH);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Burst of particles from a cell centre, oldest dropped past the cap
    pub fn emit_particles(&mut self, cell: IVec2, color: u32, count: usize) {
        let origin = crate::cell_center(cell);
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random::<f32>() - 0.5,
                self.rng.random::<f32>() - 0.5,
            ) * 0.5;
            let size = self.rng.random::<f32>() * 0.4 + 0.1;
            self.particles.push(Particle {
                pos: origin,
                vel,
                color,
                life: 1.0,
                size,
            });
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(SessionConfig::default())
    }

    #[test]
    fn test_new_snake_layout() {
        let s = state();
        assert_eq!(s.snake.head(), IVec2::ZERO);
        assert_eq!(s.snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(s.snake.body[1], IVec2::new(-1, 0));
        assert_eq!(s.snake.direction, Direction::Right);
        assert!(s.started);
        assert_eq!(s.health, INITIAL_HEALTH);
    }

    #[test]
    fn test_head_start_length() {
        let mut cfg = SessionConfig::default();
        cfg.consumables.head_start = 1;
        assert_eq!(GameState::new(cfg).snake.len(), HEAD_START_LENGTH);
    }

    #[test]
    fn test_reverse_rejected() {
        let mut s = state();
        assert!(!s.register_direction(Direction::Left));
        assert!(!s.register_direction(Direction::Right));
        assert!(s.input_queue.is_empty());
        assert!(s.register_direction(Direction::Up));
        // Reversal is judged against the queued heading
        assert!(!s.register_direction(Direction::Down));
        assert!(s.register_direction(Direction::Left));
    }

    #[test]
    fn test_queue_capped() {
        let mut s = state();
        assert!(s.register_direction(Direction::Up));
        assert!(s.register_direction(Direction::Left));
        assert!(!s.register_direction(Direction::Down));
        assert_eq!(s.input_queue.len(), INPUT_QUEUE_DEPTH);
    }

    #[test]
    fn test_tutorial_waits_for_input() {
        let cfg = SessionConfig {
            tutorial: true,
            ..Default::default()
        };
        let mut s = GameState::new(cfg);
        assert!(!s.started);
        // Rejected keys do not start the run
        assert!(!s.register_direction(Direction::Right));
        assert!(!s.register_direction(Direction::Left));
        assert!(!s.started);
        assert!(s.register_direction(Direction::Down));
        assert!(s.started);
    }

    #[test]
    fn test_hits_body_ignores_moving_tail() {
        let snake = Snake::new(IVec2::ZERO, Direction::Right, 4);
        let tail = *snake.body.back().unwrap();
        assert!(!snake.hits_body(tail, false));
        assert!(snake.hits_body(tail, true));
        assert!(snake.hits_body(IVec2::new(-1, 0), false));
    }

    #[test]
    fn test_advance_and_shrink() {
        let mut snake = Snake::new(IVec2::ZERO, Direction::Right, 3);
        snake.advance(IVec2::new(1, 0), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.prev_body[0], IVec2::ZERO);
        snake.advance(IVec2::new(2, 0), true);
        assert_eq!(snake.len(), 4);
        assert!(snake.shrink(3));
        assert!(!snake.shrink(3));
    }

    #[test]
    fn test_overlay_beats_generator() {
        let mut s = state();
        let cell = IVec2::new(14, 4);
        assert_eq!(s.block_at(cell), BlockType::Lava);
        s.set_block(cell, BlockType::Empty);
        assert_eq!(s.block_at(cell), BlockType::Empty);
    }

    #[test]
    fn test_clear_cell_keeps_overlay_minimal() {
        let mut s = state();
        let open = IVec2::new(1, 0);
        s.set_block(open, BlockType::Dirt);
        s.clear_cell(open);
        assert_eq!(s.block_at(open), BlockType::Empty);
        assert!(!s.world.contains(open));

        let lava = IVec2::new(14, 4);
        s.clear_cell(lava);
        assert_eq!(s.block_at(lava), BlockType::Empty);
        assert!(s.world.contains(lava));
    }

    #[test]
    fn test_damage_player() {
        let mut s = state();
        assert_eq!(s.damage_player(10), 10);
        assert_eq!(s.health, INITIAL_HEALTH - 10);

        s.active_power = PowerUpType::ThunderMind;
        s.power_timer = 50;
        assert_eq!(s.damage_player(30), 0);
        assert_eq!(s.active_power, PowerUpType::None);
        assert_eq!(s.health, INITIAL_HEALTH - 10);
    }

    #[test]
    fn test_tutorial_takes_no_damage() {
        let mut s = GameState::new(SessionConfig {
            tutorial: true,
            ..Default::default()
        });
        assert_eq!(s.damage_player(50), 0);
        assert_eq!(s.health, INITIAL_HEALTH);
    }

    #[test]
    fn test_particle_cap() {
        let mut s = state();
        for _ in 0..40 {
            s.emit_particles(IVec2::ZERO, 0xffffff, 10);
        }
        assert_eq!(s.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::Eat.name(), "EAT");
        assert_eq!(GameEvent::PowerUp(PowerUpType::Heal).name(), "POWERUP");
        assert_eq!(GameEvent::BossHit.name(), "BOSS_HIT");
    }

    #[test]
    fn test_enraged_below_half() {
        let mut boss = Boss::new(BossKind::Golem, IVec2::ZERO, 100, 1.0);
        assert!(!boss.is_enraged());
        boss.hp = 50;
        assert!(!boss.is_enraged());
        boss.hp = 49;
        assert!(boss.is_enraged());
    }
}
