use std::f64::consts::PI;

use crate::consolidation::SoilProfile;

/// Number of sublayers used to integrate strain over the compressible layer.
const SUBLAYERS: usize = 40;

/// Time factor where the two branches of the Terzaghi approximation meet.
const TV_SWITCH: f64 = 0.2153;

/// Vertical strain from raising the effective stress from `sigma0` by `delta` (kPa).
///
/// Constant modulus `M0 = a·m·p'c` up to the preconsolidation stress `p'c = OCR·σ'0`,
/// then `ε = ln((σ'1 − p'r) / (p'c − p'r)) / m` beyond it. Any non-positive argument
/// clamps that part to zero strain.
pub fn janbu_strain(soil: &SoilProfile, sigma0: f64, delta: f64) -> f64 {
    if !(delta > 0.0) || !(sigma0 > 0.0) { return 0.0 }

    let pc = soil.ocr * sigma0;
    let pr = soil.janbu_reference_stress;
    let sigma1 = sigma0 + delta;

    let m0 = soil.janbu_constant * soil.janbu_modulus * pc;
    let recompression = if m0 > 0.0 { (sigma1.min(pc) - sigma0) / m0 } else { 0.0 };

    let virgin = if sigma1 > pc && pc > pr {
        let ratio = (sigma1 - pr) / (pc - pr);
        if ratio > 0.0 { ratio.ln() / soil.janbu_modulus } else { 0.0 }
    } else {
        0.0
    };

    let strain = recompression + virgin;
    if strain.is_finite() { strain.max(0.0) } else { 0.0 }
}

/// Final (fully consolidated) settlement (m) of the layer between the drawdown top and
/// `bedrock_depth` under a uniform effective stress increase `delta` (kPa).
pub fn layer_settlement(soil: &SoilProfile, delta: f64, bedrock_depth: f64) -> f64 {
    let top = soil.compressible_top();
    if !(delta > 0.0) || !(bedrock_depth > top) { return 0.0 }

    let dz = (bedrock_depth - top) / SUBLAYERS as f64;
    (0..SUBLAYERS)
        .map(|k| {
            let z = top + (k as f64 + 0.5) * dz;
            janbu_strain(soil, soil.effective_stress(z), delta) * dz
        })
        .sum()
}

/// Average degree of consolidation for time factor `tv` (Terzaghi, one-dimensional).
pub fn degree_of_consolidation(tv: f64) -> f64 {
    if !(tv > 0.0) { return 0.0 }
    if tv.is_infinite() { return 1.0 }

    if tv < TV_SWITCH {
        (4.0 * tv / PI).sqrt()
    } else {
        let series = 1.0 - 8.0 / (PI * PI) * (-PI * PI * tv / 4.0).exp();
        series.max((4.0 * TV_SWITCH / PI).sqrt()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn clay() -> SoilProfile {
        SoilProfile { janbu_reference_stress: 0.0, ..SoilProfile::default() }
    }

    #[test]
    fn recompression_only_below_preconsolidation() {
        let soil = clay();
        // p'c = 1.2·100 = 120, increase stays below it.
        let strain = janbu_strain(&soil, 100.0, 10.0);
        assert_relative_eq!(strain, 10.0 / (4.0 * 15.0 * 120.0), max_relative = 1e-12);
    }

    #[test]
    fn virgin_branch_above_preconsolidation() {
        let soil = clay();
        let strain = janbu_strain(&soil, 100.0, 60.0);
        let expected = 20.0 / (4.0 * 15.0 * 120.0) + (160.0f64 / 120.0).ln() / 15.0;
        assert_relative_eq!(strain, expected, max_relative = 1e-12);
    }

    #[test]
    fn no_uplift_and_no_nan() {
        let soil = clay();
        assert_eq!(janbu_strain(&soil, 100.0, 0.0), 0.0);
        assert_eq!(janbu_strain(&soil, 100.0, -20.0), 0.0);
        assert_eq!(janbu_strain(&soil, 0.0, 20.0), 0.0);
        // Reference stress above p'c would make the logarithm meaningless.
        let odd = SoilProfile { janbu_reference_stress: 500.0, ..clay() };
        let strain = janbu_strain(&odd, 100.0, 60.0);
        assert!(strain.is_finite() && strain >= 0.0);
    }

    #[test]
    fn layer_settlement_grows_with_thickness() {
        let soil = clay();
        assert_eq!(layer_settlement(&soil, 50.0, 4.0), 0.0);
        let thin = layer_settlement(&soil, 50.0, 10.0);
        let thick = layer_settlement(&soil, 50.0, 20.0);
        assert!(thin > 0.0);
        assert!(thick > thin);
    }

    #[test]
    fn degree_of_consolidation_is_monotone() {
        assert_eq!(degree_of_consolidation(0.0), 0.0);
        assert_eq!(degree_of_consolidation(f64::INFINITY), 1.0);
        assert_abs_diff_eq!(degree_of_consolidation(0.197), 0.5, epsilon = 2e-3);
        assert_abs_diff_eq!(degree_of_consolidation(0.848), 0.9, epsilon = 2e-3);

        let mut previous = 0.0;
        for step in 1..=3000 {
            let u = degree_of_consolidation(step as f64 * 1e-3);
            assert!(u >= previous && u <= 1.0);
            previous = u;
        }
    }
}
