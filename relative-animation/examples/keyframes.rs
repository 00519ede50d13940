use relative_animation::{RelativeAnimation, TimingCurve};

fn main() {
    // Additive: frames run from (from - to) down to zero and are added to the resting value.
    let additive = RelativeAnimation::new(120.0, 40.0)
        .with_timing(Some(TimingCurve::perfect_bezier()))
        .with_steps(8)
        .keyframes()
        .expect("valid descriptor");
    println!("additive={:?}", additive.values);

    // Absolute: frames run from `from` to `to`.
    let absolute = RelativeAnimation::new([0.0, 0.0], [30.0, 60.0])
        .with_timing(Some(TimingCurve::ease_out()))
        .with_absolute(true)
        .with_steps(4)
        .keyframes()
        .expect("valid descriptor");
    for (t, v) in absolute.key_times.iter().zip(&absolute.values) {
        println!("t={t:.2} value={v:?}");
    }
}
