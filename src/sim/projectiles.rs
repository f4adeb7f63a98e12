//! Bullet and torpedo registries

use super::registry::{Registry, RemovalSet};
use super::units::{Bullet, Torpedo};

/// Every live bullet, friendly and hostile, including mines
#[derive(Debug, Clone, Default)]
pub struct Bullets {
    items: Registry<Bullet>,
}

impl Bullets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bullet: Bullet) {
        self.items.add(bullet);
    }

    /// Move all bullets; ones that expire on their own are dropped at once
    pub fn move_all(&mut self, dt: f32) {
        self.items.retain_mut(|bullet| bullet.advance(dt));
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.items.get(index)
    }

    pub fn get_all(&self) -> &[Bullet] {
        self.items.get_all()
    }

    pub fn remove(&mut self, indices: &RemovalSet) {
        self.items.remove(indices);
    }

    pub fn count(&self) -> usize {
        self.items.count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Torpedoes {
    items: Registry<Torpedo>,
}

impl Torpedoes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, torpedo: Torpedo) {
        self.items.add(torpedo);
    }

    pub fn move_all(&mut self, dt: f32) {
        for torpedo in self.items.iter_mut() {
            torpedo.advance(dt);
        }
    }

    pub fn get(&self, index: usize) -> Option<&Torpedo> {
        self.items.get(index)
    }

    pub fn get_all(&self) -> &[Torpedo] {
        self.items.get_all()
    }

    pub fn remove(&mut self, indices: &RemovalSet) {
        self.items.remove(indices);
    }

    pub fn count(&self) -> usize {
        self.items.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Direction;
    use crate::sim::units::{BulletKind, TorpedoKind};
    use glam::Vec2;

    #[test]
    fn test_expired_mines_removed_on_move() {
        let mut bullets = Bullets::new();
        bullets.add(Bullet::new(BulletKind::Mine, Vec2::new(100.0, 100.0), 0.0));
        bullets.add(Bullet::new(BulletKind::PlayerRound, Vec2::new(100.0, 100.0), 0.0));
        bullets.move_all(1.0);
        assert_eq!(bullets.count(), 2);
        bullets.move_all(25.0);
        assert_eq!(bullets.count(), 1);
        assert_eq!(bullets.get(0).map(|b| b.kind), Some(BulletKind::PlayerRound));
    }

    #[test]
    fn test_torpedoes_move_and_remove() {
        let mut torpedoes = Torpedoes::new();
        torpedoes.add(Torpedo::new(TorpedoKind::Fast, Vec2::new(0.0, 0.0), Direction::Up));
        torpedoes.add(Torpedo::new(TorpedoKind::Slow, Vec2::new(0.0, 0.0), Direction::Down));
        torpedoes.move_all(1.0);
        assert_eq!(torpedoes.get(0).map(|t| t.pos.y), Some(-130.0));
        assert_eq!(torpedoes.get(1).map(|t| t.pos.y), Some(60.0));

        torpedoes.remove(&RemovalSet::from([0]));
        assert_eq!(torpedoes.count(), 1);
        assert_eq!(torpedoes.get(0).map(|t| t.kind), Some(TorpedoKind::Slow));
    }
}
