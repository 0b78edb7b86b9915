use std::f64::consts::{PI, TAU};

use kepler_lessons::orbits::{
    OrbitError, eccentric_anomaly_from_true, mean_anomaly_from_eccentric, solve_kepler,
    solve_kepler_equation, true_anomaly_from_eccentric,
};

const ECCENTRICITIES: [f64; 8] = [0.0, 0.01, 0.1, 0.3, 0.5, 0.7, 0.9, 0.99];

#[test]
fn residual_is_tiny_across_the_elliptic_range() {
    for &e in &ECCENTRICITIES {
        for i in 0..360 {
            let m = TAU * i as f64 / 360.0;
            let ecc_anom = solve_kepler(m, e).expect("solver converges");
            let residual = ecc_anom - e * ecc_anom.sin() - m;
            assert!(
                residual.abs() < 1e-9,
                "e = {e}, M = {m}: residual {residual:e}"
            );
        }
    }
}

#[test]
fn circular_orbit_returns_mean_anomaly_exactly() {
    for m in [0.0, 0.3, PI, 5.5, -2.0, 40.0] {
        assert_eq!(solve_kepler(m, 0.0).unwrap(), m);
    }
}

#[test]
fn apsides_are_fixed_points() {
    for &e in &ECCENTRICITIES {
        assert!(solve_kepler(0.0, e).unwrap().abs() < 1e-9);
        assert!((solve_kepler(PI, e).unwrap() - PI).abs() < 1e-9);
    }
}

#[test]
fn unwrapped_mean_anomaly_stays_in_its_revolution() {
    let e = 0.6;
    let m = 3.0 * TAU + 1.0;
    let ecc_anom = solve_kepler(m, e).unwrap();
    assert!((ecc_anom - m).abs() <= PI);
    assert!((mean_anomaly_from_eccentric(ecc_anom, e) - m).abs() < 1e-9);

    let negative = solve_kepler(-1.0, e).unwrap();
    assert!(negative < 0.0);
    assert!((mean_anomaly_from_eccentric(negative, e) + 1.0).abs() < 1e-9);
}

#[test]
fn random_inputs_round_trip_through_forward_equation() {
    for _ in 0..2_000 {
        let e: f64 = rand::random_range(0.0..0.995);
        let m: f64 = rand::random_range(-TAU..TAU);
        let ecc_anom = solve_kepler(m, e).unwrap_or_else(|err| panic!("e = {e}, M = {m}: {err}"));
        let back = mean_anomaly_from_eccentric(ecc_anom, e);
        assert!((back - m).abs() < 1e-9, "e = {e}, M = {m}, back = {back}");
    }
}

#[test]
fn eccentric_anomaly_survives_forward_and_inverse_solve() {
    for e in [0.0, 0.5, 0.9, 0.99] {
        let mut worst: f64 = 0.0;
        for i in 1..=2_000 {
            let ecc_anom = -PI + TAU * i as f64 / 2_000.0;
            let m = mean_anomaly_from_eccentric(ecc_anom, e);
            let back =
                solve_kepler(m, e).unwrap_or_else(|err| panic!("e = {e}, M = {m}: {err}"));
            worst = worst.max((back - ecc_anom).abs());
        }
        assert!(
            worst < 1e-9,
            "e = {e}: worst eccentric anomaly error {worst:e}"
        );
    }
}

#[test]
fn true_anomaly_round_trips_through_the_solver() {
    for e in [0.0, 0.5, 0.9, 0.99] {
        for i in 1..36 {
            let ecc_anom = -PI + TAU * i as f64 / 36.0;
            let theta = true_anomaly_from_eccentric(ecc_anom, e);
            let m = mean_anomaly_from_eccentric(eccentric_anomaly_from_true(theta, e), e);
            let back = solve_kepler(m, e).unwrap();
            assert!(
                (back - ecc_anom).abs() < 1e-9,
                "e = {e}, E = {ecc_anom}: back {back}"
            );
            assert!((true_anomaly_from_eccentric(back, e) - theta).abs() < 1e-8);
        }
    }
}

#[test]
fn tighter_tolerance_is_honoured() {
    let loose = solve_kepler_equation(1.2, 0.8, 1e-4).unwrap();
    let tight = solve_kepler_equation(1.2, 0.8, 1e-14).unwrap();
    assert!((loose - tight).abs() < 1e-4);
    assert!((tight - 0.8 * tight.sin() - 1.2).abs() < 1e-13);
}

#[test]
fn rejects_out_of_range_inputs() {
    for e in [1.0, 1.5, -0.1, f64::NAN, f64::INFINITY] {
        let err = solve_kepler(1.0, e).unwrap_err();
        assert!(
            matches!(
                err,
                OrbitError::Domain {
                    parameter: "eccentricity",
                    ..
                }
            ),
            "e = {e}: {err:?}"
        );
    }

    let err = solve_kepler(f64::NAN, 0.2).unwrap_err();
    assert!(matches!(
        err,
        OrbitError::Domain {
            parameter: "mean_anomaly",
            ..
        }
    ));

    for tolerance in [0.0, -1e-8, f64::NAN] {
        assert!(matches!(
            solve_kepler_equation(1.0, 0.2, tolerance),
            Err(OrbitError::Domain {
                parameter: "tolerance",
                ..
            })
        ));
    }
}

#[test]
fn true_anomaly_resolves_quadrants() {
    let e = 0.5;
    assert!(true_anomaly_from_eccentric(0.0, e).abs() < 1e-15);
    assert!((true_anomaly_from_eccentric(PI, e) - PI).abs() < 1e-12);

    // The body runs ahead of the eccentric anomaly after periapsis.
    let ecc_anom = PI / 2.0;
    let theta = true_anomaly_from_eccentric(ecc_anom, e);
    assert!(theta > ecc_anom && theta < PI);
    // cosθ = (cosE - e) / (1 - e·cosE)
    assert!((theta.cos() - (ecc_anom.cos() - e) / (1.0 - e * ecc_anom.cos())).abs() < 1e-12);

    let theta_back_half = true_anomaly_from_eccentric(-ecc_anom, e);
    assert!((theta_back_half + theta).abs() < 1e-12);
}

#[test]
fn anomaly_conversions_invert_each_other() {
    for &e in &ECCENTRICITIES {
        for i in 1..36 {
            let ecc_anom = -PI + TAU * i as f64 / 36.0;
            let theta = true_anomaly_from_eccentric(ecc_anom, e);
            let back = eccentric_anomaly_from_true(theta, e);
            assert!(
                (back - ecc_anom).abs() < 1e-9,
                "e = {e}, E = {ecc_anom}: back {back}"
            );
        }
    }
}
