//! Hostile ships, projectiles and crates
//!
//! Each category is a closed enum of kinds. Per-kind behaviour is carried
//! as a static parameter record; the mutable part lives on the entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Direction, Rect};
use crate::consts::LEVEL_SPEED_FACTOR;
use crate::heading;

/// Effective speed after level scaling
#[inline]
pub fn level_speed(base: f32, level: u32) -> f32 {
    base * (1.0 + LEVEL_SPEED_FACTOR * level as f32)
}

// ── Ships ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    Submarine,
    Gunboat,
    Torpedoboat,
    Fregatte,
}

/// How a ship picks its starting point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnMethod {
    /// Random row, random side edge
    EdgeRandom,
    /// Fixed origin; a coordinate of -1 clamps to the right/bottom screen edge
    Fixed { origin: (f32, f32), direction: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GunType {
    Standard,
    Heavy,
}

impl GunType {
    pub fn bullet(self) -> BulletKind {
        match self {
            GunType::Standard => BulletKind::EnemyStandard,
            GunType::Heavy => BulletKind::EnemyHeavy,
        }
    }
}

/// Static parameters of a ship type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipParams {
    pub size: Vec2,
    pub min_speed: f32,
    pub max_speed: f32,
    pub spawn: SpawnMethod,
    /// Minimum distance of the spawn row from the horizontal midline
    pub min_dist: f32,
    pub gun: Option<GunType>,
    /// Seconds between gun shots
    pub reload: f32,
    pub torpedo: Option<TorpedoKind>,
    pub points: u32,
    pub hp: i32,
}

impl ShipKind {
    pub const ALL: [ShipKind; 4] = [
        ShipKind::Submarine,
        ShipKind::Gunboat,
        ShipKind::Torpedoboat,
        ShipKind::Fregatte,
    ];

    /// Ship type for a ratio-table index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn params(self) -> ShipParams {
        match self {
            ShipKind::Submarine => ShipParams {
                size: Vec2::new(120.0, 24.0),
                min_speed: 40.0,
                max_speed: 70.0,
                spawn: SpawnMethod::EdgeRandom,
                min_dist: 100.0,
                gun: None,
                reload: 0.0,
                torpedo: Some(TorpedoKind::Slow),
                points: 30,
                hp: 50,
            },
            ShipKind::Gunboat => ShipParams {
                size: Vec2::new(100.0, 30.0),
                min_speed: 60.0,
                max_speed: 100.0,
                spawn: SpawnMethod::EdgeRandom,
                min_dist: 50.0,
                gun: Some(GunType::Standard),
                reload: 2.5,
                torpedo: None,
                points: 20,
                hp: 100,
            },
            ShipKind::Torpedoboat => ShipParams {
                size: Vec2::new(110.0, 28.0),
                min_speed: 80.0,
                max_speed: 120.0,
                spawn: SpawnMethod::EdgeRandom,
                min_dist: 150.0,
                gun: None,
                reload: 0.0,
                torpedo: Some(TorpedoKind::Medium),
                points: 40,
                hp: 50,
            },
            ShipKind::Fregatte => ShipParams {
                size: Vec2::new(180.0, 44.0),
                min_speed: 30.0,
                max_speed: 45.0,
                spawn: SpawnMethod::Fixed {
                    origin: (-1.0, 120.0),
                    direction: Direction::Left,
                },
                min_dist: 0.0,
                gun: Some(GunType::Heavy),
                reload: 1.5,
                torpedo: Some(TorpedoKind::Fast),
                points: 100,
                hp: 300,
            },
        }
    }
}

/// A hostile ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub kind: ShipKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Base speed before level scaling (pixels/s)
    pub speed: f32,
    pub direction: Direction,
    pub hp: i32,
    /// Seconds since the gun last fired
    pub reload_elapsed: f32,
    /// One-shot torpedo flag
    pub torpedo_shot: bool,
}

impl Ship {
    pub fn new(kind: ShipKind, speed: f32, origin: Vec2, direction: Direction) -> Self {
        Self {
            kind,
            pos: origin,
            speed,
            direction,
            hp: kind.params().hp,
            reload_elapsed: 0.0,
            torpedo_shot: false,
        }
    }

    #[inline]
    pub fn params(&self) -> ShipParams {
        self.kind.params()
    }

    /// Hull rectangle; vertical ships are rotated a quarter turn
    pub fn rect(&self) -> Rect {
        let size = self.params().size;
        let size = if self.direction.is_horizontal() {
            size
        } else {
            Vec2::new(size.y, size.x)
        };
        Rect::new(self.pos.x, self.pos.y, size.x, size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn points(&self) -> u32 {
        self.params().points
    }

    pub fn has_torpedo(&self) -> bool {
        self.params().torpedo.is_some()
    }

    /// Advance along the heading
    pub fn advance(&mut self, dt: f32, level: u32) {
        self.pos += self.direction.to_vec() * level_speed(self.speed, level) * dt;
    }

    /// Count down the gun cooldown; true when a shot is due
    pub fn gun_ready(&mut self, dt: f32) -> bool {
        let params = self.params();
        if params.gun.is_none() {
            return false;
        }
        self.reload_elapsed += dt;
        if self.reload_elapsed >= params.reload {
            self.reload_elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Apply damage, floored at zero; true if the ship is defeated
    pub fn reduce_hp(&mut self, damage: i32) -> bool {
        self.hp = (self.hp - damage).max(0);
        self.hp == 0
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    /// Player turret round
    PlayerRound,
    EnemyStandard,
    EnemyHeavy,
    /// Stationary friendly mine with a limited lifetime
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletParams {
    pub speed: f32,
    pub damage: i32,
    pub friendly: bool,
    pub size: f32,
    /// Seconds until the bullet expires on its own
    pub lifetime: Option<f32>,
}

impl BulletKind {
    pub const fn params(self) -> BulletParams {
        match self {
            BulletKind::PlayerRound => BulletParams {
                speed: 600.0,
                damage: 50,
                friendly: true,
                size: 6.0,
                lifetime: None,
            },
            BulletKind::EnemyStandard => BulletParams {
                speed: 250.0,
                damage: 50,
                friendly: false,
                size: 6.0,
                lifetime: None,
            },
            BulletKind::EnemyHeavy => BulletParams {
                speed: 200.0,
                damage: 150,
                friendly: false,
                size: 10.0,
                lifetime: None,
            },
            BulletKind::Mine => BulletParams {
                speed: 0.0,
                damage: 200,
                friendly: true,
                size: 16.0,
                lifetime: Some(20.0),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub kind: BulletKind,
    /// Centre point
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
}

impl Bullet {
    /// Spawn a bullet at `pos` travelling along a compass bearing
    pub fn new(kind: BulletKind, pos: Vec2, bearing: f32) -> Self {
        Self {
            kind,
            pos,
            vel: heading(bearing) * kind.params().speed,
            age: 0.0,
        }
    }

    #[inline]
    pub fn params(&self) -> BulletParams {
        self.kind.params()
    }

    pub fn damage(&self) -> i32 {
        self.params().damage
    }

    pub fn is_friendly(&self) -> bool {
        self.params().friendly
    }

    pub fn rect(&self) -> Rect {
        let size = self.params().size;
        Rect::from_center(self.pos, Vec2::splat(size))
    }

    /// Move one step; returns false once the bullet has expired
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.age += dt;
        match self.params().lifetime {
            Some(lifetime) => self.age < lifetime,
            None => true,
        }
    }
}

// ── Torpedoes ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TorpedoKind {
    Slow,
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorpedoParams {
    pub speed: f32,
    pub damage: i32,
    pub points: u32,
}

impl TorpedoKind {
    pub const fn params(self) -> TorpedoParams {
        match self {
            TorpedoKind::Slow => TorpedoParams {
                speed: 60.0,
                damage: 300,
                points: 15,
            },
            TorpedoKind::Medium => TorpedoParams {
                speed: 90.0,
                damage: 450,
                points: 25,
            },
            TorpedoKind::Fast => TorpedoParams {
                speed: 130.0,
                damage: 600,
                points: 40,
            },
        }
    }
}

/// Torpedo footprint when travelling vertically
pub const TORPEDO_SIZE: Vec2 = Vec2::new(8.0, 32.0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Torpedo {
    pub kind: TorpedoKind,
    /// Centre point
    pub pos: Vec2,
    pub direction: Direction,
}

impl Torpedo {
    pub fn new(kind: TorpedoKind, pos: Vec2, direction: Direction) -> Self {
        Self {
            kind,
            pos,
            direction,
        }
    }

    #[inline]
    pub fn params(&self) -> TorpedoParams {
        self.kind.params()
    }

    pub fn rect(&self) -> Rect {
        let size = if self.direction.is_horizontal() {
            Vec2::new(TORPEDO_SIZE.y, TORPEDO_SIZE.x)
        } else {
            TORPEDO_SIZE
        };
        Rect::from_center(self.pos, size)
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.direction.to_vec() * self.params().speed * dt;
    }
}

// ── Crates ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrateKind {
    Repair,
    ArmorBoost,
    FullHeal,
    AreaBomb,
    MineDrop,
    RapidFire,
}

/// Crate footprint
pub const CRATE_SIZE: Vec2 = Vec2::new(30.0, 30.0);
/// Score for shooting any crate
pub const CRATE_POINTS: u32 = 100;

impl CrateKind {
    pub const ALL: [CrateKind; 6] = [
        CrateKind::Repair,
        CrateKind::ArmorBoost,
        CrateKind::FullHeal,
        CrateKind::AreaBomb,
        CrateKind::MineDrop,
        CrateKind::RapidFire,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Default effect magnitude (hit points for repair/armor)
    pub const fn default_effect(self) -> i32 {
        match self {
            CrateKind::Repair | CrateKind::ArmorBoost => 500,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crate {
    pub kind: CrateKind,
    /// Top-left corner
    pub pos: Vec2,
    pub effect: i32,
    pub points: u32,
    /// Seconds since spawn
    pub age: f32,
}

impl Crate {
    pub fn new(kind: CrateKind, pos: Vec2, effect: i32, points: u32) -> Self {
        Self {
            kind,
            pos,
            effect,
            points,
            age: 0.0,
        }
    }

    /// Crate with the default effect and score for its kind
    pub fn with_defaults(kind: CrateKind, pos: Vec2) -> Self {
        Self::new(kind, pos, kind.default_effect(), CRATE_POINTS)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CRATE_SIZE.x, CRATE_SIZE.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_speed_is_monotonic() {
        let mut last = 0.0;
        for level in 0..10 {
            let speed = level_speed(50.0, level);
            assert!(speed > last);
            last = speed;
        }
        assert_eq!(level_speed(50.0, 0), 50.0);
    }

    #[test]
    fn test_ship_moves_along_heading() {
        let mut ship = Ship::new(ShipKind::Gunboat, 100.0, Vec2::new(0.0, 200.0), Direction::Right);
        ship.advance(0.5, 0);
        assert!((ship.pos.x - 50.0).abs() < 0.001);
        assert_eq!(ship.pos.y, 200.0);

        let mut ship = Ship::new(ShipKind::Gunboat, 100.0, Vec2::new(500.0, 200.0), Direction::Left);
        ship.advance(1.0, 5);
        assert!((ship.pos.x - 350.0).abs() < 0.001);
    }

    #[test]
    fn test_gun_cooldown() {
        let mut ship = Ship::new(ShipKind::Gunboat, 80.0, Vec2::ZERO, Direction::Right);
        assert!(!ship.gun_ready(1.0));
        assert!(!ship.gun_ready(1.0));
        assert!(ship.gun_ready(1.0));
        // Timer restarts after a shot
        assert!(!ship.gun_ready(1.0));

        let mut sub = Ship::new(ShipKind::Submarine, 50.0, Vec2::ZERO, Direction::Right);
        assert!(!sub.gun_ready(100.0));
    }

    #[test]
    fn test_reduce_hp_defeat_threshold() {
        let mut ship = Ship::new(ShipKind::Gunboat, 80.0, Vec2::ZERO, Direction::Right);
        assert!(!ship.reduce_hp(50));
        assert!(ship.reduce_hp(50));
        assert_eq!(ship.hp, 0);

        // Overkill still stops at zero
        let mut sub = Ship::new(ShipKind::Submarine, 50.0, Vec2::ZERO, Direction::Right);
        assert!(sub.reduce_hp(BulletKind::Mine.params().damage));
        assert_eq!(sub.hp, 0);
    }

    #[test]
    fn test_vertical_ship_rect_is_rotated() {
        let ship = Ship::new(ShipKind::Gunboat, 80.0, Vec2::ZERO, Direction::Down);
        let rect = ship.rect();
        assert_eq!((rect.w, rect.h), (30.0, 100.0));
    }

    #[test]
    fn test_mine_expires() {
        let mut mine = Bullet::new(BulletKind::Mine, Vec2::new(10.0, 10.0), 0.0);
        assert!(mine.advance(10.0));
        assert_eq!(mine.pos, Vec2::new(10.0, 10.0));
        assert!(!mine.advance(10.0));
    }

    #[test]
    fn test_bullet_follows_bearing() {
        let mut bullet = Bullet::new(BulletKind::PlayerRound, Vec2::new(100.0, 100.0), 90.0);
        assert!(bullet.advance(0.1));
        assert!((bullet.pos.x - 160.0).abs() < 0.01);
        assert!((bullet.pos.y - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_torpedo_moves_vertically() {
        let mut torpedo = Torpedo::new(TorpedoKind::Slow, Vec2::new(50.0, 50.0), Direction::Down);
        torpedo.advance(1.0);
        assert_eq!(torpedo.pos, Vec2::new(50.0, 110.0));
    }

    #[test]
    fn test_kind_index_lookup() {
        assert_eq!(ShipKind::from_index(3), Some(ShipKind::Fregatte));
        assert_eq!(ShipKind::from_index(4), None);
        assert_eq!(CrateKind::from_index(5), Some(CrateKind::RapidFire));
    }
}
