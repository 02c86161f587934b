pub(crate) type Float = f64;
pub(crate) const DIMENSIONALITY: usize = 2;
pub(crate) type Vector = [Float; DIMENSIONALITY];

//Defined:
//Distances in meters, one astronomical unit
pub(crate) const AU: Float = 149.6e6 * 1000.;
//Gravitational constant in m^3 / (kg s^2)
pub(crate) const G: Float = 6.67e-11;
//Half a day per simulation step
pub(crate) const TIME_STEP: Float = 3600. * 12.;
pub(crate) const METERS_PER_KM: Float = 1000.;

//Derived:
pub(crate) const SECONDS_PER_YEAR: Float = 365.25 * 24. * 3600.;

pub(crate) fn difference(from: &Vector, to: &Vector) -> Vector {
    let mut result = [0.; DIMENSIONALITY];
    for i in 0..DIMENSIONALITY {
        result[i] = to[i] - from[i];
    }
    result
}

pub(crate) fn norm(vector: &Vector) -> Float {
    vector.iter().map(|x| x * x).sum::<Float>().sqrt()
}
