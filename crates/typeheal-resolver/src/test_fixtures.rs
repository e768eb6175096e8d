//! Shared universe for the resolver tests.
//!
//! | module         | types                                                      |
//! |----------------|------------------------------------------------------------|
//! | `CORLIB`       | `System.Int32`, `System.String`, `List`1`, `Dictionary`2`  |
//! | `Game`         | `New.Foo` (was `Old.Foo`), `Combat.Blade` (was `Sword`),   |
//! |                | `Inventory.Bag`1` (was `Items.Bag`1`), `Shared.Token`      |
//! | `Game.Plugins` | `Plugins.Relocated`, `Shared.Token`, `Plugins.Moved`       |
//!
//! `Plugins.Moved` declares that it used to live in module `Legacy`.

use crate::universe::{MovedFrom, StaticUniverse, TypeUniverse};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub const CORLIB: &str = "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";

pub static GAME_UNIVERSE: Lazy<Arc<StaticUniverse>> = Lazy::new(|| Arc::new(build_game_universe()));

pub fn build_game_universe() -> StaticUniverse {
    let mut builder = StaticUniverse::builder();
    let corlib = builder.add_module(CORLIB);
    builder.add_type(corlib, "System.Int32");
    builder.add_type(corlib, "System.String");
    builder.add_type(corlib, "System.Collections.Generic.List`1");
    builder.add_type(corlib, "System.Collections.Generic.Dictionary`2");

    let game = builder.add_module("Game");
    let foo = builder.add_type(game, "New.Foo");
    builder.mark_moved_from(foo, MovedFrom::namespace("Old"));
    let blade = builder.add_type(game, "Combat.Blade");
    builder.mark_moved_from(blade, MovedFrom::default().with_class_name("Sword"));
    let bag = builder.add_type(game, "Inventory.Bag`1");
    builder.mark_moved_from(bag, MovedFrom::namespace("Items"));
    builder.add_type(game, "Shared.Token");

    let plugins = builder.add_module("Game.Plugins");
    builder.add_type(plugins, "Plugins.Relocated");
    builder.add_type(plugins, "Shared.Token");
    let moved = builder.add_type(plugins, "Plugins.Moved");
    builder.mark_moved_from(moved, MovedFrom::module("Legacy"));

    builder.build()
}

pub fn game_universe() -> Arc<dyn TypeUniverse> {
    GAME_UNIVERSE.clone()
}

/// Install a subscriber for the current test so `tracing` output is visible
/// with `--nocapture`.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}
