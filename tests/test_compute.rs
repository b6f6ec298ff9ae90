use galaga_clone::compute::*;
use galaga_clone::entities::*;
use galaga_clone::input::Controls;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(800.0, 600.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> Controls {
    Controls::default()
}

fn bullet_at(x: f32, y: f32) -> Bullet {
    Bullet { x, y, width: 4.0, height: 20.0 }
}

// ── init_state / reset_game ──────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 375.0); // width / 2 - 25
    assert_eq!(s.player.y, 540.0); // height - 60
    assert_eq!(s.player.width, 50.0);
    assert_eq!(s.player.height, 50.0);
}

#[test]
fn init_state_counters() {
    let s = make_state();
    assert_eq!(s.lives, 3);
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.last_shot_ms, None);
    assert!(s.bullets.is_empty());
    assert!(s.obstacles.is_empty());
}

#[test]
fn reset_after_game_over_restores_everything() {
    let mut s = make_state();
    s.score = 120;
    s.lives = 0;
    s.status = GameStatus::GameOver;
    s.player.x = 10.0;
    s.bullets.push(bullet_at(5.0, 5.0));
    s.obstacles.push(Obstacle::new(100.0, 0.0, 2.0, 45.0));

    let r = reset_game(&s);
    assert_eq!(r.score, 0);
    assert_eq!(r.lives, 3);
    assert_eq!(r.status, GameStatus::Playing);
    assert!(r.bullets.is_empty());
    assert!(r.obstacles.is_empty());
    assert_eq!(r.player.x, 375.0);
    assert_eq!(r.width, 800.0);
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_left_by_one_step() {
    let s = make_state();
    let s2 = move_player(&s, &Controls { left: true, ..idle() });
    assert_eq!(s2.player.x, 371.5);
}

#[test]
fn move_right_by_one_step() {
    let s = make_state();
    let s2 = move_player(&s, &Controls { right: true, ..idle() });
    assert_eq!(s2.player.x, 378.5);
}

#[test]
fn opposite_keys_cancel_out() {
    let s = make_state();
    let s2 = move_player(&s, &Controls { left: true, right: true, shooting: false });
    assert_eq!(s2.player.x, s.player.x);
}

#[test]
fn holding_left_clamps_at_zero() {
    let mut s = make_state();
    for _ in 0..500 {
        s = move_player(&s, &Controls { left: true, ..idle() });
        assert!(s.player.x >= 0.0);
    }
    assert_eq!(s.player.x, 0.0);
}

#[test]
fn holding_right_clamps_at_far_edge() {
    let mut s = make_state();
    for _ in 0..500 {
        s = move_player(&s, &Controls { right: true, ..idle() });
        assert!(s.player.x <= s.width - s.player.width);
    }
    assert_eq!(s.player.x, 750.0);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _ = move_player(&s, &Controls { left: true, ..idle() });
    assert_eq!(s.player.x, 375.0);
}

// ── shoot ─────────────────────────────────────────────────────────────────────

#[test]
fn shoot_spawns_bullet_centered_on_player_top() {
    let s = make_state();
    let s2 = shoot(&s, 1_000);
    assert_eq!(s2.bullets.len(), 1);
    let b = &s2.bullets[0];
    assert_eq!(b.x, 398.0); // 375 + 25 - 2
    assert_eq!(b.y, 540.0);
    assert_eq!(b.width, 4.0);
    assert_eq!(b.height, 20.0);
    assert_eq!(s2.last_shot_ms, Some(1_000));
}

#[test]
fn shoot_twice_within_cooldown_gives_one_bullet() {
    let s = make_state();
    let s2 = shoot(&s, 1_000);
    let s3 = shoot(&s2, 1_899);
    assert_eq!(s3.bullets.len(), 1);
    assert_eq!(s3.last_shot_ms, Some(1_000));
}

#[test]
fn shoot_again_after_cooldown_gives_two_bullets() {
    let s = make_state();
    let s2 = shoot(&s, 1_000);
    let s3 = shoot(&s2, 1_900);
    assert_eq!(s3.bullets.len(), 2);
    assert_eq!(s3.last_shot_ms, Some(1_900));
}

#[test]
fn first_shot_is_never_blocked() {
    let s = make_state();
    assert_eq!(shoot(&s, 0).bullets.len(), 1);
}

// ── update_bullets ────────────────────────────────────────────────────────────

#[test]
fn bullets_move_up_five() {
    let mut s = make_state();
    s.bullets.push(bullet_at(100.0, 300.0));
    let s2 = update_bullets(&s);
    assert_eq!(s2.bullets[0].y, 295.0);
}

#[test]
fn bullet_kept_while_bottom_edge_on_screen() {
    let mut s = make_state();
    // y=-15 → -20, bottom edge at 0 → kept; y=-16 → -21, bottom at -1 → dropped
    s.bullets.push(bullet_at(10.0, -15.0));
    s.bullets.push(bullet_at(20.0, -16.0));
    let s2 = update_bullets(&s);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].x, 10.0);
    assert_eq!(s2.bullets[0].y, -20.0);
}

#[test]
fn retained_bullets_always_have_bottom_edge_on_screen() {
    let mut s = make_state();
    s = shoot(&s, 0);
    for _ in 0..200 {
        s = update_bullets(&s);
        assert!(s.bullets.iter().all(|b| b.y + b.height >= 0.0));
    }
    assert!(s.bullets.is_empty());
}

// ── spawn_obstacle / update_obstacles ────────────────────────────────────────

#[test]
fn spawned_obstacles_are_within_ranges() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..200 {
        s = spawn_obstacle(&s, &mut rng);
    }
    assert_eq!(s.obstacles.len(), 200);
    for o in &s.obstacles {
        assert!(o.x >= 0.0 && o.x <= 750.0);
        assert_eq!(o.x, o.x.floor());
        assert_eq!(o.y, 0.0);
        assert!(o.speed >= 1.0 && o.speed < 4.0);
        assert!(o.rotation >= 0.0 && o.rotation < 360.0);
        assert_eq!(o.width, 50.0);
        assert_eq!(o.height, 50.0);
    }
}

#[test]
fn spawn_is_deterministic_for_a_seed() {
    let s = make_state();
    let a = spawn_obstacle(&s, &mut seeded_rng());
    let b = spawn_obstacle(&s, &mut seeded_rng());
    assert_eq!(a.obstacles, b.obstacles);
}

#[test]
fn obstacle_falls_by_its_own_speed() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 0.0, 2.0, 0.0));
    s.obstacles.push(Obstacle::new(300.0, 0.0, 3.5, 0.0));
    let s2 = update_obstacles(&s);
    assert_eq!(s2.obstacles[0].y, 2.0);
    assert_eq!(s2.obstacles[1].y, 3.5);
}

#[test]
fn obstacle_dropped_past_bottom_edge() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 598.0, 2.0, 0.0)); // → 600, kept
    s.obstacles.push(Obstacle::new(300.0, 599.0, 2.0, 0.0)); // → 601, dropped
    let s2 = update_obstacles(&s);
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.obstacles[0].y, 600.0);
}

#[test]
fn rotation_never_changes_while_falling() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 0.0, 1.5, 123.0));
    for _ in 0..50 {
        s = update_obstacles(&s);
    }
    assert_eq!(s.obstacles[0].rotation, 123.0);
}

#[test]
fn fifty_idle_ticks_move_obstacle_to_one_hundred() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 0.0, 2.0, 0.0));
    for i in 0..50 {
        s = tick(&s, &idle(), i * 16);
    }
    assert_eq!(s.obstacles.len(), 1);
    assert_eq!(s.obstacles[0].y, 100.0);
    assert_eq!(s.frame, 50);
}

#[test]
fn fifty_idle_ticks_drop_obstacle_on_short_field() {
    let mut s = init_state(800.0, 99.0);
    s.player.y = 1_000.0; // keep the player out of the way
    s.obstacles.push(Obstacle::new(100.0, 0.0, 2.0, 0.0));
    for i in 0..50 {
        s = tick(&s, &idle(), i * 16);
    }
    assert!(s.obstacles.is_empty());
}

// ── check_collisions: bullets ↔ obstacles ──────────────────────────────────

#[test]
fn bullet_matching_obstacle_box_destroys_both() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 100.0, 2.0, 0.0));
    s.bullets.push(Bullet { x: 100.0, y: 100.0, width: 50.0, height: 50.0 });
    let s2 = check_collisions(&s);
    assert!(s2.bullets.is_empty());
    assert!(s2.obstacles.is_empty());
    assert_eq!(s2.score, 10);
}

#[test]
fn touching_edges_do_not_collide() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 100.0, 2.0, 0.0));
    s.bullets.push(bullet_at(150.0, 100.0)); // left edge == obstacle right edge
    s.bullets.push(bullet_at(120.0, 150.0)); // top edge == obstacle bottom edge
    let s2 = check_collisions(&s);
    assert_eq!(s2.bullets.len(), 2);
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.score, 0);
}

#[test]
fn two_bullets_one_obstacle_destroys_it_once() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 100.0, 2.0, 0.0));
    s.bullets.push(bullet_at(110.0, 120.0));
    s.bullets.push(bullet_at(130.0, 120.0));
    let s2 = check_collisions(&s);
    assert!(s2.obstacles.is_empty());
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].x, 130.0);
    assert_eq!(s2.score, 10);
}

#[test]
fn simultaneous_hits_are_all_resolved() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 100.0, 2.0, 0.0));
    s.obstacles.push(Obstacle::new(300.0, 100.0, 2.0, 0.0));
    s.obstacles.push(Obstacle::new(500.0, 100.0, 2.0, 0.0));
    s.bullets.push(bullet_at(510.0, 110.0));
    s.bullets.push(bullet_at(110.0, 110.0));
    s.bullets.push(bullet_at(310.0, 110.0));
    let s2 = check_collisions(&s);
    assert!(s2.obstacles.is_empty());
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.score, 30);
}

#[test]
fn one_bullet_over_two_obstacles_takes_only_one() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(100.0, 100.0, 2.0, 0.0));
    s.obstacles.push(Obstacle::new(120.0, 100.0, 2.0, 0.0));
    s.bullets.push(bullet_at(130.0, 110.0));
    let s2 = check_collisions(&s);
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.obstacles[0].x, 120.0);
    assert_eq!(s2.score, 10);
}

// ── check_collisions: obstacles ↔ player ───────────────────────────────────

#[test]
fn obstacle_hitting_player_costs_a_life() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(375.0, 530.0, 2.0, 0.0));
    let s2 = check_collisions(&s);
    assert!(s2.obstacles.is_empty());
    assert_eq!(s2.lives, 2);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
}

#[test]
fn three_crashes_end_the_game() {
    let mut s = make_state();
    for expected in [2, 1, 0] {
        s.obstacles.push(Obstacle::new(375.0, 530.0, 2.0, 0.0));
        s = check_collisions(&s);
        assert_eq!(s.lives, expected);
    }
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn shot_obstacle_does_not_also_hit_player() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(375.0, 530.0, 2.0, 0.0));
    s.bullets.push(bullet_at(398.0, 530.0));
    let s2 = check_collisions(&s);
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.score, 10);
}

#[test]
fn lives_saturate_at_zero() {
    let mut s = make_state();
    s.lives = 1;
    s.obstacles.push(Obstacle::new(360.0, 530.0, 2.0, 0.0));
    s.obstacles.push(Obstacle::new(390.0, 530.0, 2.0, 0.0));
    let s2 = check_collisions(&s);
    assert_eq!(s2.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    let s2 = tick(&s, &idle(), 0);
    assert_eq!(s2.frame, 6);
}

#[test]
fn tick_fires_while_shooting_subject_to_cooldown() {
    let mut s = make_state();
    let fire = Controls { shooting: true, ..idle() };
    // 60 frames at ~16 ms: shots at t=0 and t=912 only
    for i in 0..60 {
        s = tick(&s, &fire, i * 16);
    }
    assert_eq!(s.last_shot_ms, Some(912));
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn tick_bullet_destroys_obstacle_in_its_path() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::new(380.0, 0.0, 1.0, 0.0));
    s = shoot(&s, 0);
    let mut destroyed_at = None;
    for i in 0..120 {
        s = tick(&s, &idle(), i * 16);
        if s.score == 10 {
            destroyed_at = Some(i);
            break;
        }
    }
    assert!(destroyed_at.is_some());
    assert!(s.obstacles.is_empty());
    assert!(s.bullets.is_empty());
}

#[test]
fn tick_is_inert_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.obstacles.push(Obstacle::new(100.0, 0.0, 2.0, 0.0));
    let s2 = tick(&s, &Controls { left: true, right: false, shooting: true }, 5_000);
    assert_eq!(s2.frame, s.frame);
    assert_eq!(s2.obstacles[0].y, 0.0);
    assert_eq!(s2.player.x, s.player.x);
    assert!(s2.bullets.is_empty());
}

#[test]
fn invariants_hold_over_a_random_game() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let controls = [
        Controls { left: true, right: false, shooting: true },
        Controls { left: false, right: true, shooting: true },
    ];
    for i in 0..2_000u64 {
        if i % 120 == 0 {
            s = spawn_obstacle(&s, &mut rng);
        }
        s = tick(&s, &controls[(i / 90 % 2) as usize], i * 16);
        assert!(s.bullets.iter().all(|b| b.y + b.height >= 0.0));
        assert!(s.obstacles.iter().all(|o| o.y <= s.height));
        assert!(s.player.x >= 0.0 && s.player.x <= s.width - s.player.width);
        assert_eq!(s.score % 10, 0);
    }
}
