//=========================================================================
// LilyPad Demo
//
// A frog on a pond. Arrow keys hop around, Space shakes the camera, a
// click or tap teleports the frog, Escape quits.
//
// Usage:
//   lilypad-demo [path/to/frog.png]
//
// Without an argument the frog is drawn procedurally.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use lilypad::prelude::*;

const FROG_SPEED: f32 = 60.0;
const FROG_SIZE: u32 = 16;

/// State shared between the update and draw callbacks.
struct World {
    frog: Option<Sprite>,
    was_pointer_down: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("lilypad-demo: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), lilypad::Error> {
    let mut engine = EngineBuilder::new()
        .with_background_hex("#1b5e3b")
        .with_container("LilyPad Demo")
        .with_auto_fit(true)
        .build()?;

    let frog_image = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading frog from '{}'", path);
            let mut loaded = engine.load(&[path])?;
            loaded.remove(0)
        }
        None => {
            log::info!("No image given, drawing the frog procedurally");
            engine.session_mut().assets_mut().insert("frog", procedural_frog())
        }
    };

    let (width, height) = {
        let config = engine.session().config();
        (config.width as f32, config.height as f32)
    };
    let frog = Sprite::new(
        Arc::clone(&frog_image),
        (width - frog_image.width() as f32) / 2.0,
        (height - frog_image.height() as f32) / 2.0,
    );

    let world = Rc::new(RefCell::new(World {
        frog: Some(frog),
        was_pointer_down: false,
    }));
    let update_world = Rc::clone(&world);
    let draw_world = Rc::clone(&world);

    engine
        .on_update(move |ctx, dt| {
            let mut world = update_world.borrow_mut();
            let input = ctx.input();

            if input.is_pressed(KeyCode::Escape) {
                ctx.stop();
                return;
            }

            let mut dx = 0.0;
            let mut dy = 0.0;
            if input.is_pressed(KeyCode::ArrowLeft) {
                dx -= 1.0;
            }
            if input.is_pressed(KeyCode::ArrowRight) {
                dx += 1.0;
            }
            if input.is_pressed(KeyCode::ArrowUp) {
                dy -= 1.0;
            }
            if input.is_pressed(KeyCode::ArrowDown) {
                dy += 1.0;
            }

            let pointer = input.pointer();
            let tapped = input.touches().first().copied();
            let clicked = pointer.down && !world.was_pointer_down;
            world.was_pointer_down = pointer.down;
            let shake = input.is_pressed(KeyCode::Space);

            if let Some(frog) = world.frog.as_mut() {
                let step = FROG_SPEED * dt as f32;
                frog.x += dx * step;
                frog.y += dy * step;
                if dx != 0.0 {
                    frog.flip_x = dx < 0.0;
                }

                let target = if clicked {
                    Some((pointer.x, pointer.y))
                } else {
                    tapped.map(|t| (t.x, t.y))
                };
                if let Some((x, y)) = target {
                    frog.x = x - frog.width / 2.0;
                    frog.y = y - frog.height / 2.0;
                }
            }

            if shake {
                ctx.shake_default();
            }
        })
        .on_draw(move |canvas| {
            let world = draw_world.borrow();
            let (w, h) = (canvas.width() as f32, canvas.height() as f32);

            // Lily pad
            canvas.fill_rect(w / 2.0 - 30.0, h / 2.0 - 20.0, 60.0, 40.0, Color::new_rgb(46, 139, 87));

            if let Some(frog) = &world.frog {
                frog.draw(canvas);
            }
        })
        .run()?;

    Ok(())
}

/// 16x16 frog: green body, two white eyes with black pupils.
fn procedural_frog() -> Image {
    let body = Color::new_rgb(120, 200, 80);
    let belly = Color::new_rgb(200, 230, 150);

    Image::from_fn(FROG_SIZE, FROG_SIZE, |x, y| {
        let (fx, fy) = (x as f32 - 7.5, y as f32 - 8.5);
        let eye = |cx: f32| (x as f32 - cx).powi(2) + (y as f32 - 3.0).powi(2) <= 4.0;

        if eye(4.0) || eye(11.0) {
            if (x == 4 || x == 11) && y == 3 {
                Color::BLACK
            } else {
                Color::WHITE
            }
        } else if fx * fx / 56.0 + fy * fy / 30.0 <= 1.0 {
            if fy > 2.0 && fx.abs() < 4.0 {
                belly
            } else {
                body
            }
        } else {
            Color::TRANSPARENT
        }
    })
}
