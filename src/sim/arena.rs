//! Arena generation: random obstacles outside the two safe zones

use rand::Rng;

use super::entity::Obstacle;
use super::rect::Rect;
use crate::Config;

/// Place a random number of obstacles
///
/// Each obstacle gets a bounded number of tries; one that never finds a free
/// spot is skipped, so the result may hold fewer than the drawn count.
/// `next_id` is advanced for every obstacle placed.
pub fn generate_obstacles<R: Rng>(config: &Config, rng: &mut R, next_id: &mut u32) -> Vec<Obstacle> {
    let safe_zones = config.safe_zones();
    let wanted = rng.random_range(config.obstacle_count_min..=config.obstacle_count_max);
    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(wanted as usize);

    for _ in 0..wanted {
        for _ in 0..config.obstacle_attempts {
            let w = rng.random_range(config.obstacle_size_min..=config.obstacle_size_max);
            let h = rng.random_range(config.obstacle_size_min..=config.obstacle_size_max);
            let x = rng.random_range(0.0..=(config.arena_width - w).max(0.0));
            let y = rng.random_range(0.0..=(config.arena_height - h).max(0.0));
            let rect = Rect::new(x, y, w, h);

            let blocked = safe_zones.iter().any(|z| rect.overlaps(z))
                || obstacles.iter().any(|o| rect.overlaps(&o.rect));
            if !blocked {
                obstacles.push(Obstacle { id: *next_id, rect });
                *next_id += 1;
                break;
            }
        }
    }

    if obstacles.len() < wanted as usize {
        log::debug!("Placed {} of {} obstacles", obstacles.len(), wanted);
    }
    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacles_avoid_safe_zones_and_each_other() {
        let config = Config::default();
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut next_id = 1;
            let obstacles = generate_obstacles(&config, &mut rng, &mut next_id);

            assert!(obstacles.len() <= config.obstacle_count_max as usize);
            assert_eq!(next_id as usize, obstacles.len() + 1);
            for (i, o) in obstacles.iter().enumerate() {
                for zone in config.safe_zones() {
                    assert!(!o.rect.overlaps(&zone));
                }
                for other in &obstacles[i + 1..] {
                    assert!(!o.rect.overlaps(&other.rect));
                }
                assert!(o.rect.x >= 0.0 && o.rect.right() <= config.arena_width);
                assert!(o.rect.y >= 0.0 && o.rect.bottom() <= config.arena_height);
                assert!(o.rect.w >= 30.0 && o.rect.w <= 80.0);
            }
        }
    }

    #[test]
    fn test_default_arena_places_all_obstacles() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut next_id = 1;
        let obstacles = generate_obstacles(&config, &mut rng, &mut next_id);
        assert!(obstacles.len() >= config.obstacle_count_min as usize);
    }

    #[test]
    fn test_zero_obstacles() {
        let config = Config {
            obstacle_count_min: 0,
            obstacle_count_max: 0,
            ..Config::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut next_id = 1;
        assert!(generate_obstacles(&config, &mut rng, &mut next_id).is_empty());
    }
}
