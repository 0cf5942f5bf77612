//! First-person HUD.
//!
//! Meters for any player component that implements [`MeterSource`], a
//! readout of the secondary-fire state, and a flash on the health meter when
//! a hit registers. Nothing here writes back to the controller.

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::core::{Arena, Cooldown, PlayerHitEvent};
use crate::first_person::{AttackState, FirstPersonPlayer, Health, SecondaryCharge};

const METER_WIDTH: f32 = 150.0;
const METER_HEIGHT: f32 = 10.0;
const HEALTH_COLOR: Color = Color::srgb(0.8, 0.2, 0.2);
const HIT_FLASH_COLOR: Color = Color::srgb(1.0, 0.85, 0.85);
const HIT_FLASH_SECONDS: f32 = 0.15;
const CHARGING_COLOR: Color = Color::srgb(0.2, 0.45, 0.6);
const CHARGED_COLOR: Color = Color::srgb(0.3, 0.8, 1.0);
const SPENDING_COLOR: Color = Color::srgb(0.15, 0.25, 0.3);

/// A player component a HUD meter can display.
pub trait MeterSource: Component {
    /// How full the meter is, from 0 to 1.
    fn fill(&self) -> f32;
}

impl MeterSource for Health {
    fn fill(&self) -> f32 {
        self.percentage()
    }
}

impl MeterSource for SecondaryCharge {
    fn fill(&self) -> f32 {
        self.percentage().clamp(0.0, 1.0)
    }
}

/// Fill node of the meter that shows `C`.
#[derive(Component)]
pub struct MeterFill<C: MeterSource>(PhantomData<C>);

impl<C: MeterSource> Default for MeterFill<C> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

/// Every top-level HUD node, for cleanup.
#[derive(Component)]
pub struct HudRoot;

/// Text line naming the secondary-fire state.
#[derive(Component)]
pub struct AttackReadout;

/// Brief highlight on the health meter after a registered hit.
#[derive(Component, Default)]
pub struct HitFlash(Cooldown);

pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(Arena::FirstPerson), spawn_hud)
        .add_systems(OnExit(Arena::FirstPerson), cleanup_hud)
        .add_systems(
            Update,
            (
                update_meter::<Health>,
                update_meter::<SecondaryCharge>,
                update_attack_display,
                flash_on_hit,
            )
                .run_if(in_state(Arena::FirstPerson)),
        );
}

/// Readout text and charge-meter color for the secondary-fire state.
pub fn attack_display(state: &AttackState, charge: &SecondaryCharge) -> (&'static str, Color) {
    match state {
        AttackState::SecondaryWindUp { .. } => ("CHARGING BEAM", SPENDING_COLOR),
        AttackState::SecondaryFire { .. } => ("BEAM", SPENDING_COLOR),
        _ if charge.is_full() => ("BEAM READY", CHARGED_COLOR),
        _ => ("", CHARGING_COLOR),
    }
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                bottom: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|column| {
            column.spawn((
                AttackReadout,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(CHARGED_COLOR),
            ));
            spawn_meter::<SecondaryCharge>(column, "Charge", CHARGING_COLOR, ());
            spawn_meter::<Health>(column, "Health", HEALTH_COLOR, HitFlash::default());
        });

    // Centre dot
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|screen| {
            screen.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
        });
}

/// A caption over a track with a fill node tagged for `C`.
fn spawn_meter<C: MeterSource>(
    parent: &mut ChildBuilder,
    caption: &str,
    color: Color,
    extra: impl Bundle,
) {
    parent.spawn((
        Text::new(caption),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.75, 0.75, 0.75)),
    ));
    parent
        .spawn((
            Node {
                width: Val::Px(METER_WIDTH),
                height: Val::Px(METER_HEIGHT),
                ..default()
            },
            BackgroundColor(Color::srgb(0.08, 0.08, 0.08)),
        ))
        .with_children(|track| {
            track.spawn((
                MeterFill::<C>::default(),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
                extra,
            ));
        });
}

fn update_meter<C: MeterSource>(
    player_query: Query<&C, With<FirstPersonPlayer>>,
    mut fill_query: Query<&mut Node, With<MeterFill<C>>>,
) {
    let Ok(source) = player_query.get_single() else {
        return;
    };
    for mut node in fill_query.iter_mut() {
        node.width = Val::Percent(source.fill() * 100.0);
    }
}

fn update_attack_display(
    player_query: Query<(&AttackState, &SecondaryCharge), With<FirstPersonPlayer>>,
    mut fill_query: Query<&mut BackgroundColor, With<MeterFill<SecondaryCharge>>>,
    mut readout_query: Query<&mut Text, With<AttackReadout>>,
) {
    let Ok((state, charge)) = player_query.get_single() else {
        return;
    };
    let (label, color) = attack_display(state, charge);

    for mut fill in fill_query.iter_mut() {
        fill.0 = color;
    }
    for mut text in readout_query.iter_mut() {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}

fn flash_on_hit(
    time: Res<Time>,
    mut hit_events: EventReader<PlayerHitEvent>,
    player_query: Query<(), With<FirstPersonPlayer>>,
    mut fill_query: Query<(&mut HitFlash, &mut BackgroundColor)>,
) {
    // Drain every event so none carries over to the next frame
    let hit = hit_events
        .read()
        .fold(false, |hit, event| hit | player_query.contains(event.entity));

    for (mut flash, mut fill) in fill_query.iter_mut() {
        flash.0.tick(time.delta_secs());
        if hit {
            flash.0.trigger(HIT_FLASH_SECONDS);
        }
        fill.0 = if flash.0.is_ready() {
            HEALTH_COLOR
        } else {
            HIT_FLASH_COLOR
        };
    }
}

fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_follows_beam_cycle() {
        let mut charge = SecondaryCharge::new(100.0);
        assert_eq!(attack_display(&AttackState::Waiting, &charge).0, "");

        charge.add(100.0);
        assert_eq!(
            attack_display(&AttackState::PrimaryFire, &charge),
            ("BEAM READY", CHARGED_COLOR)
        );

        charge.reset();
        let wind_up = AttackState::SecondaryWindUp { remaining: 0.5 };
        assert_eq!(
            attack_display(&wind_up, &charge),
            ("CHARGING BEAM", SPENDING_COLOR)
        );
        let firing = AttackState::SecondaryFire { remaining: 1.0 };
        assert_eq!(attack_display(&firing, &charge).0, "BEAM");
    }

    #[test]
    fn meters_track_player_components() {
        let mut app = App::new();
        app.add_systems(
            Update,
            (update_meter::<Health>, update_meter::<SecondaryCharge>),
        );

        let mut health = Health::new(100.0);
        health.take_hit(50.0, 0.0);
        let mut charge = SecondaryCharge::new(100.0);
        charge.add(25.0);
        app.world_mut().spawn((FirstPersonPlayer, health, charge));
        let health_fill = app
            .world_mut()
            .spawn((MeterFill::<Health>::default(), Node::default()))
            .id();
        let charge_fill = app
            .world_mut()
            .spawn((MeterFill::<SecondaryCharge>::default(), Node::default()))
            .id();

        app.update();

        let width = |entity| app.world().get::<Node>(entity).map(|node| node.width);
        assert_eq!(width(health_fill), Some(Val::Percent(50.0)));
        assert_eq!(width(charge_fill), Some(Val::Percent(25.0)));
    }

    #[test]
    fn registered_hit_flashes_health_meter() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_event::<PlayerHitEvent>()
            .add_systems(Update, flash_on_hit);

        let player = app
            .world_mut()
            .spawn((FirstPersonPlayer, Health::new(100.0)))
            .id();
        let stranger = app.world_mut().spawn_empty().id();
        let fill = app
            .world_mut()
            .spawn((HitFlash::default(), BackgroundColor(HEALTH_COLOR)))
            .id();
        let color = |app: &App| app.world().get::<BackgroundColor>(fill).map(|c| c.0);

        app.world_mut().send_event(PlayerHitEvent {
            entity: stranger,
            amount: 20.0,
            remaining_health: None,
        });
        app.update();
        assert_eq!(color(&app), Some(HEALTH_COLOR));

        app.world_mut().send_event(PlayerHitEvent {
            entity: player,
            amount: 20.0,
            remaining_health: Some(80.0),
        });
        app.update();
        assert_eq!(color(&app), Some(HIT_FLASH_COLOR));
    }
}
