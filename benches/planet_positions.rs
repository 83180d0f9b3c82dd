use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sidereal::bodies::moon::moon_position;
use sidereal::bodies::planets::planet_position;
use sidereal::bodies::sun::sun_position;
use sidereal::earth_orientation::EarthOrientation;
use sidereal::{Ephemeris, EphemerisParams, Planet};

/// Random dates between 1950 and 2050, as (day count at 0h, UT hours).
fn random_instants(rng: &mut StdRng, samples: usize) -> Vec<(f64, f64)> {
    (0..samples)
        .map(|_| {
            let day = rng.random_range(18262.0..54787.0_f64).floor() + 0.5;
            (day, rng.random_range(0.0..24.0))
        })
        .collect()
}

fn bench_bodies(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let params = EphemerisParams::default();
    let samples = 1_000usize;

    c.bench_function("bodies/sun", |b| {
        b.iter_batched(
            || random_instants(&mut rng, samples),
            |cases| {
                for (mjd, ut) in cases {
                    let orientation = EarthOrientation::at(mjd);
                    black_box(sun_position(black_box(mjd), ut, &orientation, &params).ok());
                }
            },
            BatchSize::LargeInput,
        )
    });

    c.bench_function("bodies/moon", |b| {
        b.iter_batched(
            || random_instants(&mut rng, samples),
            |cases| {
                for (mjd, ut) in cases {
                    let orientation = EarthOrientation::at(mjd);
                    black_box(moon_position(black_box(mjd), ut, &orientation));
                }
            },
            BatchSize::LargeInput,
        )
    });

    for planet in Planet::ALL {
        c.bench_function(&format!("bodies/{}", planet.name().to_lowercase()), |b| {
            b.iter_batched(
                || random_instants(&mut rng, samples),
                |cases| {
                    for (mjd, ut) in cases {
                        let orientation = EarthOrientation::at(mjd);
                        black_box(planet_position(planet, black_box(mjd), ut, &orientation, &params).ok());
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
}

/// One session evaluating everything on a fixed date, caches warm after the first call.
fn bench_session(c: &mut Criterion) {
    let mut eph = Ephemeris::new();
    eph.set_date(2023, 9, 30).unwrap();
    eph.set_time(21, 0, 0.0).unwrap();

    c.bench_function("ephemeris/all_bodies_cached_date", |b| {
        b.iter(|| {
            black_box(eph.sun().ok());
            black_box(eph.moon().ok());
            for planet in Planet::ALL {
                black_box(eph.planet(planet).ok());
            }
        })
    });

    c.bench_function("ephemeris/moon_rise_set", |b| {
        b.iter(|| black_box(eph.moon_rise_set().ok()))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_bodies, bench_session
);
criterion_main!(benches);
