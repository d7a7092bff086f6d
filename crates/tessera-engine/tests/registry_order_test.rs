//! Paint order under arbitrary add/remove/update sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tessera_engine::Graphics;
use tessera_engine::scene::{DrawCmd, Sprite, SpriteId};
use tessera_engine::surface::Rgba8;

/// Reference model: registered ids with their registration rank.
#[derive(Default)]
struct Model {
    registered: Vec<(SpriteId, u64)>,
    next_rank: u64,
}

impl Model {
    fn add(&mut self, id: SpriteId) {
        if self.registered.iter().all(|&(r, _)| r != id) {
            self.registered.push((id, self.next_rank));
            self.next_rank += 1;
        }
    }

    fn remove(&mut self, id: SpriteId) {
        self.registered.retain(|&(r, _)| r != id);
    }

    fn expected(&self, g: &Graphics) -> Vec<SpriteId> {
        let mut v = self.registered.clone();
        v.sort_by_key(|&(id, rank)| (g.sprite(id).map(|s| s.z.0), rank));
        v.into_iter().map(|(id, _)| id).collect()
    }
}

fn fill() -> DrawCmd {
    DrawCmd::Fill(Rgba8::WHITE)
}

#[test]
fn example_scenario_orders_by_z_then_insertion() {
    let mut g = Graphics::with_size(2, 2, 60).unwrap();
    let a = g.create_sprite(Sprite::new(5, fill()));
    let b = g.create_sprite(Sprite::new(1, fill()));
    let c = g.create_sprite(Sprite::new(5, fill()));

    assert_eq!(g.render_order().collect::<Vec<_>>(), vec![b, a, c]);
}

#[test]
fn random_mutations_keep_stable_sort() {
    let mut rng = StdRng::seed_from_u64(0x7e55e7a);
    let mut g = Graphics::with_size(2, 2, 60).unwrap();
    let mut model = Model::default();

    let ids: Vec<SpriteId> = (0..24)
        .map(|_| {
            let id = g.create_sprite(Sprite::new(rng.gen_range(-3..4i32), fill()));
            model.add(id);
            id
        })
        .collect();

    for step in 0..2_000 {
        let id = ids[rng.gen_range(0..ids.len())];
        match rng.gen_range(0..4) {
            0 => {
                g.add_sprite(id);
                model.add(id);
            }
            1 => {
                g.remove_sprite(id);
                model.remove(id);
            }
            2 => g.set_sprite_z(id, rng.gen_range(-3..4i32)),
            _ => {
                // Unregistered z changes must be picked up when re-added.
                g.sprite_mut(id).unwrap().z = rng.gen_range(-3..4i32).into();
                g.update_sprite(id);
            }
        }

        assert_eq!(
            g.render_order().collect::<Vec<_>>(),
            model.expected(&g),
            "order diverged at step {step}"
        );
    }
}

#[test]
fn duplicate_add_and_absent_remove_keep_size() {
    let mut g = Graphics::with_size(2, 2, 60).unwrap();
    let a = g.create_sprite(Sprite::new(0, fill()));
    let b = g.create_sprite(Sprite::new(0, fill()));
    g.remove_sprite(b);
    assert_eq!(g.registered_len(), 1);

    g.add_sprite(a);
    assert_eq!(g.registered_len(), 1);
    g.remove_sprite(b);
    assert_eq!(g.registered_len(), 1);
}

#[test]
fn updated_sprite_keeps_rank_among_equal_z() {
    let mut g = Graphics::with_size(2, 2, 60).unwrap();
    let a = g.create_sprite(Sprite::new(0, fill()));
    let b = g.create_sprite(Sprite::new(0, fill()));
    let c = g.create_sprite(Sprite::new(0, fill()));

    g.set_sprite_z(a, 3);
    g.set_sprite_z(a, 0);
    assert_eq!(g.render_order().collect::<Vec<_>>(), vec![a, b, c]);
}

#[test]
fn higher_z_is_painted_on_top() {
    let mut g = Graphics::with_size(2, 2, 60).unwrap();
    let red = Rgba8::rgb(255, 0, 0);
    let blue = Rgba8::rgb(0, 0, 255);
    let top = g.create_sprite(Sprite::new(10, DrawCmd::Fill(red)));
    g.create_sprite(Sprite::new(0, DrawCmd::Fill(blue)));

    g.update();
    assert_eq!(g.screen().get(1, 1), Some(red));

    g.set_sprite_z(top, -10);
    g.update();
    assert_eq!(g.screen().get(1, 1), Some(blue));
}

#[test]
fn commands_from_another_thread_apply_on_update() {
    let mut g = Graphics::with_size(2, 2, 60).unwrap();
    let a = g.create_sprite(Sprite::new(0, fill()));
    let b = g.create_sprite(Sprite::new(1, fill()));
    let tx = g.command_sender();

    std::thread::spawn(move || {
        tx.set_z(b, -1);
        tx.destroy(a);
    })
    .join()
    .unwrap();

    assert_eq!(g.render_order().collect::<Vec<_>>(), vec![a, b]);
    g.update();
    assert_eq!(g.render_order().collect::<Vec<_>>(), vec![b]);
    assert!(g.sprite(a).is_none());
}
