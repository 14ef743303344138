//! Concrete inputs and queries for the arena.

use ua_brain::Services;
use ua_core::{Rotator, UaResult, Vec3};
use ua_query::{Dimension, FnQuery, QueryResult};

pub fn register(services: &mut Services) -> UaResult<()> {
    // Distance from self to the context target, or to the context location
    // when there is no target.
    services.inputs.register_fn("Distance", |ctx, view, _| {
        let from = view.agents.location(ctx.self_agent).unwrap_or_default();
        let to = ctx
            .target
            .and_then(|h| view.agents.resolve(h))
            .and_then(|id| view.agents.location(id))
            .unwrap_or(ctx.location);
        from.distance(to)
    })?;

    services.inputs.register_fn("Constant", |_, _, params| params.get_or("Value", 1.0))?;

    // Every other live agent within `Range`.
    services.queries.register(
        "Nearby",
        FnQuery::new(Dimension::Target, |ctx, view, params| {
            let range = params.get_or("Range", 100.0);
            let origin = view.agents.location(ctx.self_agent).unwrap_or_default();
            QueryResult::Targets(
                view.agents
                    .agent_ids()
                    .filter(|&id| id != ctx.self_agent)
                    .filter(|&id| view.agents.location(id).is_some_and(|p| p.distance(origin) <= range))
                    .filter_map(|id| view.agents.handle(id))
                    .collect(),
            )
        })
        .reuse_for(0.25)
        .cache_on("Range"),
    )?;

    // Eight points on a circle of `Radius` around self.
    services.queries.register(
        "Ring",
        FnQuery::new(Dimension::Location, |ctx, view, params| {
            let radius = params.get_or("Radius", 50.0);
            let origin = view.agents.location(ctx.self_agent).unwrap_or_default();
            QueryResult::Locations(
                (0..8)
                    .map(|i| {
                        let a = i as f32 * std::f32::consts::FRAC_PI_4;
                        origin + Vec3::new(a.cos(), a.sin(), 0.0) * radius
                    })
                    .collect(),
            )
        })
        // One ring per wander; a fresh ring is a new context.
        .reuse_for(2.0),
    )?;

    services.queries.register(
        "Headings",
        FnQuery::new(Dimension::Rotation, |_, _, _| {
            QueryResult::Rotations((0..4).map(|i| Rotator::from_yaw(i as f32 * 90.0)).collect())
        }),
    )?;
    Ok(())
}
