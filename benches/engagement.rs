use criterion::{criterion_group, criterion_main, Criterion};

use star_siege::engine::catalog::{KindSpec, UnitCatalog};
use star_siege::engine::combatant::Combatant;
use star_siege::engine::engagement::fight;
use star_siege::engine::rng::RandomStream;

fn mixed_catalog() -> UnitCatalog {
    UnitCatalog::new(vec![
        KindSpec { weapons: 50.0, shield: 10.0, armor: 400.0, rapid_fire: vec![(3, 5)] },
        KindSpec { weapons: 400.0, shield: 50.0, armor: 2700.0, rapid_fire: vec![(0, 6), (3, 5)] },
        KindSpec { weapons: 1000.0, shield: 200.0, armor: 6000.0, rapid_fire: vec![(3, 5)] },
        KindSpec { weapons: 1.0, shield: 1.0, armor: 200.0, rapid_fire: Vec::new() },
    ])
    .unwrap()
}

fn bench_engagement(c: &mut Criterion) {
    let catalog = mixed_catalog();

    let mut attacker = Combatant::new(4, 10, 10, 10);
    attacker.set_group(0, 2000);
    attacker.set_group(1, 500);
    attacker.set_group(2, 100);

    let mut defender = Combatant::new(4, 9, 9, 9);
    defender.set_group(1, 300);
    defender.set_group(2, 200);
    defender.set_group(3, 1000);

    c.bench_function("fight_mixed_fleets", |b| {
        b.iter(|| {
            let mut attackers = vec![attacker.clone()];
            let mut defenders = vec![defender.clone()];
            let mut rng = RandomStream::new(987654321).unwrap();
            fight(&catalog, &mut attackers, &mut defenders, &mut rng).unwrap()
        })
    });
}

criterion_group!(benches, bench_engagement);
criterion_main!(benches);
