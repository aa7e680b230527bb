//! RF cavity: nonlinear longitudinal boost along a tabulated on-axis field,
//! combined with a two-gap thin-lens transverse multipole chain.
//!
//! The largest synthesizer in this core. Three sub-steps, run in sequence
//! against the live state: `propagate_long_rf_cav` advances the reference
//! particle's phase/energy through the cavity, `init_rf_cav` does the same
//! for the real particle while also snapshotting the before/after kinematics
//! `gen_cav_mat` needs, and `gen_cav_mat` assembles the 7x7 transfer from
//! those kinematics plus the cavity's thin-lens multipole table.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::PathBuf;

use ndarray::Array2;
use state::{
    Element, MomentState, PHASE_SPACE_DIM, PS_CHARGE, PS_PS, PS_PX, PS_PY, PS_S, PS_X, PS_Y,
    Particle, StateError,
};

use cavdata::{AxisField, MultipoleCurve, SliceKind, ThinLensTable, TransitFactors};

use crate::cavity_phase::CavityPhaseSolver;
use crate::config_value::ElementConfig;
use crate::core::{ElementCore, m_to_mm};
use crate::error::ConfigError;
use crate::runtime_config::RuntimeConfig;

pub struct RfCavity {
    core: ElementCore,
    cavi: u8,
    multip: f64,
    rm_mm: f64,
    f_rf: f64,
    scl_fac: f64,
    phi_sync_rad: f64,
    mpole_level: u8,
    gap_center_1: f64,
    gap_center_2: f64,
    axis: AxisField,
    thin_lens: ThinLensTable,
    curves: HashMap<SliceKind, MultipoleCurve>,
    gap_curves: [MultipoleCurve; 2],
    /// `phi_ref`, written back every advance; exposed so an outer simulator
    /// can surface it through the element's configuration the way the
    /// original writes it into `Config` under the key `"phi_ref"`.
    phi_ref: f64,
    solver: Box<dyn CavityPhaseSolver>,
}

const GATED_MULTIPOLE_KINDS: [SliceKind; 7] = [
    SliceKind::EFocus1,
    SliceKind::EFocus2,
    SliceKind::EDipole,
    SliceKind::EQuad,
    SliceKind::HMono,
    SliceKind::HDipole,
    SliceKind::HQuad,
];

impl RfCavity {
    pub fn from_config(
        cfg: &ElementConfig,
        runtime: &RuntimeConfig,
        solver: Box<dyn CavityPhaseSolver>,
    ) -> Result<Self, ConfigError> {
        let length_mm = m_to_mm(cfg.get_f64("L")?);
        let cavtype = cfg.get_string("cavtype")?;
        let info = config::cavity_type_info(cavtype).ok_or_else(|| ConfigError::UnknownCavityType {
            element: cfg.name().into(),
            cavtype: cavtype.into(),
        })?;

        let eng_dir_cfg = cfg.try_get_string("Eng_Data_Dir")?.unwrap_or(".");
        let eng_dir: PathBuf = match &runtime.eng_data_root {
            Some(root) => root.join(eng_dir_cfg),
            None => PathBuf::from(eng_dir_cfg),
        };

        let axis = AxisField::load(eng_dir.join(format!("axisData_{}.txt", info.label)))?;
        let multipole_dir = eng_dir.join(format!("Multipole{}", info.label));
        let thin_lens = ThinLensTable::load(multipole_dir.join(format!("thinlenlon_{}.txt", info.label)))?;

        let mut curves = HashMap::new();
        for kind in GATED_MULTIPOLE_KINDS {
            let path = multipole_dir.join(format!("CaviMlp_{}_{}.txt", slice_kind_name(kind), info.label));
            curves.insert(kind, MultipoleCurve::load(path)?);
        }
        let gap_curves = [
            MultipoleCurve::load(multipole_dir.join(format!("CaviMlp_Gap1_{}.txt", info.label)))?,
            MultipoleCurve::load(multipole_dir.join(format!("CaviMlp_Gap2_{}.txt", info.label)))?,
        ];

        let f_rf = cfg.get_f64("f")?;
        let scl_fac = cfg.get_f64_or("scl_fac", 1.0)?;
        let phi_sync_rad = cfg.get_f64("phi")? * PI / 180.0;
        // The two gaps' electrical centers, offset from the cavity's
        // mechanical midpoint. Not specified anywhere in the kept source;
        // defaulted to a symmetric placement a sixth of the cavity length
        // either side of center when the lattice doesn't supply one.
        let gap_center_1 = cfg.get_f64_or("GapCenter1", -length_mm / 6.0)?;
        let gap_center_2 = cfg.get_f64_or("GapCenter2", length_mm / 6.0)?;

        let mut core = ElementCore::new(cfg.name(), length_mm)?;
        core.transfer_raw[[PS_X, PS_PX]] = length_mm;
        core.transfer_raw[[PS_Y, PS_PY]] = length_mm;

        Ok(Self {
            core,
            cavi: info.cavi,
            multip: info.multip as f64,
            rm_mm: info.rm_mm,
            f_rf,
            scl_fac,
            phi_sync_rad,
            mpole_level: runtime.mpole_level,
            gap_center_1,
            gap_center_2,
            axis,
            thin_lens,
            curves,
            gap_curves,
            phi_ref: 0.0,
            solver,
        })
    }

    /// The cavity phase last written back by `propagate_long_rf_cav`,
    /// standing in for the original's `Config::set("phi_ref", ...)`.
    pub fn phi_ref(&self) -> f64 {
        self.phi_ref
    }

    fn gated(&self, kind: SliceKind) -> bool {
        match kind {
            SliceKind::EFocus1 | SliceKind::EFocus2 => true,
            SliceKind::EDipole | SliceKind::HDipole => self.mpole_level >= 1,
            SliceKind::EQuad | SliceKind::HMono | SliceKind::HQuad => self.mpole_level >= 2,
            SliceKind::Drift | SliceKind::AccGap => false,
        }
    }

    fn build_enriched_slices(&self, k_tab: &[f64; 3], beta_tab: &[f64; 3], gamma_tab: &[f64; 3]) -> Vec<EnrichedSlice> {
        let mut out = Vec::with_capacity(self.thin_lens.slices.len());
        let mut s = self.axis.s[0];
        let mut accgap_count = 0usize;

        for slice in &self.thin_lens.slices {
            let mut t = 0.0;
            let mut s_fac = 0.0;
            let mut v0 = 0.0;
            let mut accel = 0.0;
            let before_center = s < 0.0;

            match slice.kind {
                SliceKind::Drift => {}
                SliceKind::AccGap => {
                    let i = accgap_count.min(1);
                    accel = (beta_tab[i] * gamma_tab[i]) / (beta_tab[i + 1] * gamma_tab[i + 1]);
                    accgap_count += 1;
                }
                kind if self.gated(kind) => {
                    let (lookup_kind, negate_t, negate_s) = reflection(kind, before_center);
                    let lookup_k = if before_center { k_tab[0] } else { k_tab[1] };
                    let tf: TransitFactors = self.curves[&lookup_kind].eval(lookup_k);
                    t = if negate_t { -tf.t } else { tf.t };
                    s_fac = if negate_s { -tf.s } else { tf.s };
                    v0 = slice.e0 * tf.v0;
                }
                _ => {}
            }

            out.push(EnrichedSlice {
                kind: slice.kind,
                length: slice.length,
                t,
                s: s_fac,
                v0,
                accel,
                before_center,
            });
            s += slice.length;
        }

        out
    }

    fn gap_transit_factors(&self, gap: usize, beta: f64) -> TransitFactors {
        let mut tf = self.gap_curves[gap].eval(beta);
        tf.v0 *= self.scl_fac;
        tf
    }

    fn build_transverse_matrix(
        &self,
        phi_in: f64,
        real_z: f64,
        k_tab: &[f64; 3],
        beta_tab: &[f64; 3],
        gamma_tab: &[f64; 3],
    ) -> Array2<f64> {
        let enriched = self.build_enriched_slices(k_tab, beta_tab, gamma_tab);
        let mut m = Array2::eye(PHASE_SPACE_DIM);
        let mut phi = phi_in;
        let mut gap_index = 0usize;

        for slice in &enriched {
            let beta = beta_tab[gap_index];
            let gamma = gamma_tab[gap_index];
            let k = k_tab[gap_index];
            let mut patch = Array2::eye(PHASE_SPACE_DIM);

            match slice.kind {
                SliceKind::Drift => {
                    phi += k * slice.length;
                    patch[[PS_X, PS_PX]] = slice.length;
                    patch[[PS_Y, PS_PY]] = slice.length;
                }
                SliceKind::EFocus1 | SliceKind::EFocus2 | SliceKind::EQuad => {
                    let kfdx = real_z * slice.v0 / (beta * beta * gamma * config::ION_A * config::AU)
                        * (slice.t * phi.cos() - slice.s * phi.sin())
                        / self.rm_mm;
                    patch[[PS_PX, PS_X]] = kfdx;
                    patch[[PS_PY, PS_Y]] = if matches!(slice.kind, SliceKind::EQuad) { -kfdx } else { kfdx };
                }
                SliceKind::EDipole => {
                    let dpy = real_z * slice.v0 / (beta * beta * gamma * config::ION_A * config::AU)
                        * (slice.t * phi.cos() - slice.s * phi.sin());
                    patch[[PS_PY, PS_CHARGE]] = dpy;
                }
                SliceKind::HMono | SliceKind::HQuad => {
                    let phase = phi + FRAC_PI_2;
                    let (beta, gamma) = if matches!(slice.kind, SliceKind::HQuad) {
                        if slice.before_center {
                            ((beta_tab[0] + beta_tab[1]) / 2.0, (gamma_tab[0] + gamma_tab[1]) / 2.0)
                        } else {
                            ((beta_tab[1] + beta_tab[2]) / 2.0, (gamma_tab[1] + gamma_tab[2]) / 2.0)
                        }
                    } else {
                        (beta, gamma)
                    };
                    let kfdx = -config::MU0 * config::C0 * real_z * slice.v0
                        / (beta * gamma * config::ION_A * config::AU)
                        * (slice.t * phase.cos() - slice.s * phase.sin())
                        / self.rm_mm;
                    patch[[PS_PX, PS_X]] = kfdx;
                    patch[[PS_PY, PS_Y]] = if matches!(slice.kind, SliceKind::HQuad) { -kfdx } else { kfdx };
                }
                SliceKind::HDipole => {
                    let phase = phi + FRAC_PI_2;
                    let dpy = -config::MU0 * config::C0 * real_z * slice.v0
                        / (beta * gamma * config::ION_A * config::AU)
                        * (slice.t * phase.cos() - slice.s * phase.sin());
                    patch[[PS_PY, PS_CHARGE]] = dpy;
                }
                SliceKind::AccGap => {
                    patch[[PS_PX, PS_PX]] = slice.accel;
                    patch[[PS_PY, PS_PY]] = slice.accel;
                    gap_index = (gap_index + 1).min(2);
                }
            }

            m = patch.dot(&m);
        }

        m
    }

    fn build_longitudinal_block(
        &self,
        phi_in: f64,
        real_z: f64,
        e_s: f64,
        lambda_rf: f64,
        k_tab: &[f64; 3],
        beta_tab: &[f64; 3],
        gamma_tab: &[f64; 3],
    ) -> Array2<f64> {
        let dis = self.core.length_mm / 2.0;
        let l1 = dis + self.gap_center_1;
        let l2 = self.gap_center_2 - self.gap_center_1;
        let l3 = dis - self.gap_center_2;

        let k1 = 0.5 * (k_tab[0] + k_tab[1]);
        let k2 = 0.5 * (k_tab[1] + k_tab[2]);

        let gap1 = self.gap_transit_factors(0, beta_tab[0]);
        let gap2 = self.gap_transit_factors(1, beta_tab[1]);

        let drift_block = |beta: f64, gamma: f64, l: f64| -> Array2<f64> {
            let m45 = -2.0 * PI / lambda_rf * (1.0 / (beta.powi(3) * gamma.powi(3)) * (config::MEV_TO_EV / e_s) * l);
            Array2::from_shape_vec((2, 2), vec![1.0, m45, 0.0, 1.0]).expect("fixed shape")
        };
        let kick_block = |t: f64, s: f64, v0: f64, phi: f64| -> Array2<f64> {
            let m54 = -real_z * v0 * t * phi.sin() - real_z * v0 * s * phi.cos();
            Array2::from_shape_vec((2, 2), vec![1.0, 0.0, m54, 1.0]).expect("fixed shape")
        };

        let l1_mat = drift_block(beta_tab[0], gamma_tab[0], l1);
        let phi_k1 = phi_in + k1 * l1;
        let k1_mat = kick_block(gap1.t, gap1.s, gap1.v0, phi_k1);

        let l2_mat = drift_block(beta_tab[1], gamma_tab[1], l2);
        let phi_k2 = phi_k1 + k2 * l2;
        let k2_mat = kick_block(gap2.t, gap2.s, gap2.v0, phi_k2);

        let l3_mat = drift_block(beta_tab[2], gamma_tab[2], l3);

        l3_mat.dot(&k2_mat).dot(&l2_mat).dot(&k1_mat).dot(&l1_mat)
    }

    fn gen_cav_mat(&self, phi_in: f64, real: &Particle, outcome: &CavBoostOutcome) -> Array2<f64> {
        let lambda_rf = config::C0 / self.f_rf * config::M_TO_MM;
        let beta_tab = [outcome.beta_in, outcome.avebeta, real.beta];
        let gamma_tab = [outcome.gamma_in, outcome.avegamma, real.gamma];
        let k_tab: [f64; 3] = std::array::from_fn(|i| 2.0 * PI / (beta_tab[i] * lambda_rf));

        let mut m = self.build_transverse_matrix(phi_in, real.z, &k_tab, &beta_tab, &gamma_tab);
        let m_lon = self.build_longitudinal_block(phi_in, real.z, real.e_s, lambda_rf, &k_tab, &beta_tab, &gamma_tab);

        m[[PS_S, PS_S]] = m_lon[[0, 0]];
        m[[PS_S, PS_PS]] = m_lon[[0, 1]];
        m[[PS_PS, PS_S]] = m_lon[[1, 0]];
        m[[PS_PS, PS_PS]] = m_lon[[1, 1]];
        m
    }
}

/// A thin-lens slice enriched with the transit factors/acceleration ratio
/// `GetCavMatParams` tabulates ahead of the transverse assembly pass.
struct EnrichedSlice {
    kind: SliceKind,
    length: f64,
    t: f64,
    s: f64,
    v0: f64,
    accel: f64,
    before_center: bool,
}

/// At the first gap (before the cavity's electrical center), electric
/// elements look up the *other* `EFocus` curve and flip the sign of `S`;
/// electric dipole/quad elements keep their own curve but still flip `S`;
/// magnetic elements keep their own curve and flip `T` instead. Past the
/// center, every kind reads its own curve unmodified.
fn reflection(kind: SliceKind, before_center: bool) -> (SliceKind, bool, bool) {
    if !before_center {
        return (kind, false, false);
    }
    match kind {
        SliceKind::EFocus1 => (SliceKind::EFocus2, false, true),
        SliceKind::EFocus2 => (SliceKind::EFocus1, false, true),
        SliceKind::EDipole | SliceKind::EQuad => (kind, false, true),
        SliceKind::HMono | SliceKind::HDipole | SliceKind::HQuad => (kind, true, false),
        SliceKind::Drift | SliceKind::AccGap => (kind, false, false),
    }
}

fn slice_kind_name(kind: SliceKind) -> &'static str {
    match kind {
        SliceKind::Drift => "drift",
        SliceKind::EFocus1 => "EFocus1",
        SliceKind::EFocus2 => "EFocus2",
        SliceKind::EDipole => "EDipole",
        SliceKind::EQuad => "EQuad",
        SliceKind::HMono => "HMono",
        SliceKind::HDipole => "HDipole",
        SliceKind::HQuad => "HQuad",
        SliceKind::AccGap => "AccGap",
    }
}

struct CavBoostOutcome {
    beta_in: f64,
    gamma_in: f64,
    avebeta: f64,
    avegamma: f64,
    phi_in: f64,
}

/// The longitudinal drift-kick integrator shared by the reference and real
/// particle boosts: steps along the axis field, accumulating energy gain and
/// phase slip. Returns `(phi_out, accumulated ΔW)`.
fn get_cav_boost(axis: &AxisField, particle: &mut Particle, phi0: f64, f_rf: f64, e_field_scl: f64) -> (f64, f64) {
    let lambda_rf = config::C0 / f_rf * config::M_TO_MM;
    let n = axis.len();
    let dz = axis.span() / (n as f64 - 1.0);

    let w0 = particle.w;
    let mut w = particle.w;
    let mut beta = particle.beta;
    let mut k = if beta == 0.0 {
        2.0 * PI / lambda_rf
    } else {
        2.0 * PI / (beta * lambda_rf)
    };
    let mut phi = phi0;

    for i in 0..n - 1 {
        let phi_last = phi;
        phi += k * dz;
        w += particle.z * e_field_scl * (axis.e_z[i] + axis.e_z[i + 1]) / 2.0 * ((phi_last + phi) / 2.0).cos() * dz
            / config::M_TO_MM;

        if w < particle.e_s {
            w = particle.e_s;
            beta = 0.0;
        } else {
            let gamma = w / particle.e_s;
            beta = (1.0 - 1.0 / (gamma * gamma)).sqrt();
        }
        k = if beta == 0.0 {
            2.0 * PI / lambda_rf
        } else {
            2.0 * PI / (beta * lambda_rf)
        };
    }

    particle.e_k = w - particle.e_s;
    particle.recompute();
    (phi, w - w0)
}

fn propagate_long_rf_cav(
    axis: &AxisField,
    ref_particle: &mut Particle,
    phi_sync_rad: f64,
    f_rf: f64,
    e_field_scl: f64,
    multip: f64,
    cavi: u8,
    solver: &dyn CavityPhaseSolver,
) -> f64 {
    let cavi_fy = solver.solve(cavi, ref_particle, phi_sync_rad, multip);
    let phi_in = multip * ref_particle.phi_s + cavi_fy;
    let (phi_out, _acc_ion_w) = get_cav_boost(axis, ref_particle, phi_in, f_rf, e_field_scl);
    ref_particle.phi_s += (phi_out - phi_in) / multip;
    cavi_fy
}

fn init_rf_cav(
    axis: &AxisField,
    real: &mut Particle,
    phi_ref: f64,
    f_rf: f64,
    e_field_scl: f64,
    multip: f64,
) -> CavBoostOutcome {
    let phi_in = multip * real.phi_s + phi_ref;
    let beta_in = real.beta;
    let gamma_in = real.gamma;

    let (phi_out, _acc_ion_w) = get_cav_boost(axis, real, phi_in, f_rf, e_field_scl);
    real.phi_s += (phi_out - phi_in) / multip;

    CavBoostOutcome {
        beta_in,
        gamma_in,
        avebeta: 0.5 * (beta_in + real.beta),
        avegamma: 0.5 * (gamma_in + real.gamma),
        phi_in,
    }
}

impl Element for RfCavity {
    fn name(&self) -> &str {
        &self.core.name
    }
    fn length_mm(&self) -> f64 {
        self.core.length_mm
    }
    fn is_rfcavity(&self) -> bool {
        true
    }
    fn last_kenergy_in(&self) -> f64 {
        self.core.last_kenergy_in
    }
    fn last_kenergy_out(&self) -> f64 {
        self.core.last_kenergy_out
    }
    fn misalign(&self) -> &Array2<f64> {
        &self.core.misalign
    }
    fn misalign_inv(&self) -> &Array2<f64> {
        &self.core.misalign_inv
    }
    fn transfer(&self) -> &Array2<f64> {
        &self.core.transfer
    }
    fn set_transfer(&mut self, transfer: Array2<f64>) {
        self.core.transfer = transfer;
    }

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        self.core.last_kenergy_in = state.real_particle.e_k;

        let phi_ref = propagate_long_rf_cav(
            &self.axis,
            &mut state.ref_particle,
            self.phi_sync_rad,
            self.f_rf,
            self.scl_fac,
            self.multip,
            self.cavi,
            self.solver.as_ref(),
        );
        self.phi_ref = phi_ref;
        state.last_caviphi = phi_ref;

        // Matches the original's sequencing: captured before `InitRFCav`
        // runs, so for a cavity this is the pre-boost energy — vestigial,
        // since the kernel only consumes `last_kenergy_out` for non-cavity
        // elements.
        self.core.last_kenergy_out = state.real_particle.e_k;

        let outcome = init_rf_cav(&self.axis, &mut state.real_particle, phi_ref, self.f_rf, self.scl_fac, self.multip);

        self.core.transfer_raw = self.gen_cav_mat(outcome.phi_in, &state.real_particle, &outcome);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cavity_phase::IdentityPhaseSolver;
    use crate::config_value::ConfigValue;
    use state::advance;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, name: &str, contents: &str) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    fn curve_fixture() -> &'static str {
        "0.0 1.0 0.0 0.5 1000.0\n1.0 1.0 0.0 0.5 1000.0\n"
    }

    fn build_cavity_with_thin_lens(dir: &std::path::Path, thin_lens: &str) -> RfCavity {
        write_file(dir, "axisData_41.txt", "-50.0 0.0\n0.0 1.0\n50.0 0.0\n");
        std::fs::create_dir_all(dir.join("Multipole41")).unwrap();
        write_file(&dir.join("Multipole41"), "thinlenlon_41.txt", thin_lens);
        for kind in ["EFocus1", "EFocus2", "EDipole", "EQuad", "HMono", "HDipole", "HQuad"] {
            write_file(&dir.join("Multipole41"), &format!("CaviMlp_{kind}_41.txt"), curve_fixture());
        }
        write_file(&dir.join("Multipole41"), "CaviMlp_Gap1_41.txt", curve_fixture());
        write_file(&dir.join("Multipole41"), "CaviMlp_Gap2_41.txt", curve_fixture());

        let cfg = ElementConfig::new("cav1")
            .with("L", ConfigValue::Float(0.3))
            .with("cavtype", ConfigValue::String("0.041QWR".into()))
            .with("Eng_Data_Dir", ConfigValue::String(dir.to_string_lossy().into_owned()))
            .with("f", ConfigValue::Float(80.5e6))
            .with("scl_fac", ConfigValue::Float(1.0))
            .with("phi", ConfigValue::Float(-30.0));
        let runtime = RuntimeConfig::default();
        RfCavity::from_config(&cfg, &runtime, Box::new(IdentityPhaseSolver)).unwrap()
    }

    fn build_fixture_cavity(dir: &std::path::Path) -> RfCavity {
        build_cavity_with_thin_lens(
            dir,
            "drift   d1   10.0  10.0\n\
             EFocus1 g1   0.0   10.0  1.0\n\
             AccGap  gap1 0.0   10.0\n\
             drift   d2   10.0  10.0\n\
             AccGap  gap2 0.0   10.0\n\
             EFocus2 g2   0.0   10.0  1.0\n\
             drift   d3   10.0  10.0\n",
        )
    }

    #[test]
    fn scenario_cavity_boosts_energy_and_publishes_phi_ref() {
        let dir = tempfile::tempdir().unwrap();
        let mut cav = build_fixture_cavity(dir.path());

        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        let mut state = MomentState::new(p, p);

        advance(&mut state, &mut cav).unwrap();

        assert!(state.real_particle.e_k > 0.0);
        assert_eq!(cav.phi_ref(), -30.0 * PI / 180.0);
    }

    #[test]
    fn longitudinal_moment_entries_reflect_the_phase_and_energy_deltas() {
        let dir = tempfile::tempdir().unwrap();
        let mut cav = build_fixture_cavity(dir.path());

        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        let mut state = MomentState::new(p, p);
        advance(&mut state, &mut cav).unwrap();

        let expected_s = state.real_particle.phi_s - state.ref_particle.phi_s;
        let expected_ps = (state.real_particle.e_k - state.ref_particle.e_k) / config::MEV_TO_EV;
        assert!((state.moment0[PS_S] - expected_s).abs() < 1e-12);
        assert!((state.moment0[PS_PS] - expected_ps).abs() < 1e-12);
    }

    /// A lattice of exactly one gated slice reduces `build_transverse_matrix`
    /// to the single kick patch, so the resulting matrix entries are the
    /// kick formula's raw output with no drift/gap composition to obscure a
    /// sign error.
    fn single_slice_transverse_matrix(dir: &std::path::Path, kind: &str) -> Array2<f64> {
        let thin_lens = format!("{kind} g1 0.0 10.0 1.0\n");
        let cav = build_cavity_with_thin_lens(dir, &thin_lens);
        let k_tab = [1.0_f64, 1.0, 1.0];
        let beta_tab = [0.5_f64, 0.5, 0.5];
        let gamma_tab = [1.1_f64, 1.1, 1.1];
        cav.build_transverse_matrix(0.0, 1.0, &k_tab, &beta_tab, &gamma_tab)
    }

    #[test]
    fn efocus_kick_is_unreflected_with_matching_x_and_y_sign() {
        let dir = tempfile::tempdir().unwrap();
        let m = single_slice_transverse_matrix(dir.path(), "EFocus1");

        assert!(m[[PS_PX, PS_X]] > 0.0);
        assert_eq!(m[[PS_PX, PS_X]], m[[PS_PY, PS_Y]]);
    }

    /// `EQuad`'s x-kick is identical to `EFocus1`'s (`Mprob(1,0)=kfdx`,
    /// unmodified by kind) but its y-kick must be negated (`kfdy=-kfdx`,
    /// while `EFocus1`/`EFocus2` keep `kfdy=kfdx`). A regression of either
    /// sign would silently invert the cavity's transverse focusing.
    #[test]
    fn equad_kick_matches_efocus_on_x_but_negates_y() {
        let dir = tempfile::tempdir().unwrap();
        let m_focus = single_slice_transverse_matrix(dir.path(), "EFocus1");
        let m_quad = single_slice_transverse_matrix(dir.path(), "EQuad");

        assert_eq!(m_focus[[PS_PX, PS_X]], m_quad[[PS_PX, PS_X]]);
        assert_eq!(m_quad[[PS_PY, PS_Y]], -m_quad[[PS_PX, PS_X]]);
    }

    #[test]
    fn hmono_kick_is_unreflected_with_matching_x_and_y_sign() {
        let dir = tempfile::tempdir().unwrap();
        let m = single_slice_transverse_matrix(dir.path(), "HMono");

        assert_eq!(m[[PS_PX, PS_X]], m[[PS_PY, PS_Y]]);
    }

    #[test]
    fn hquad_kick_matches_hmono_on_x_but_negates_y() {
        let dir = tempfile::tempdir().unwrap();
        let m_mono = single_slice_transverse_matrix(dir.path(), "HMono");
        let m_quad = single_slice_transverse_matrix(dir.path(), "HQuad");

        assert_eq!(m_mono[[PS_PX, PS_X]], m_quad[[PS_PX, PS_X]]);
        assert_eq!(m_quad[[PS_PY, PS_Y]], -m_quad[[PS_PX, PS_X]]);
    }

    #[test]
    fn edipole_kick_lands_on_the_py_charge_entry_not_px() {
        let dir = tempfile::tempdir().unwrap();
        let m = single_slice_transverse_matrix(dir.path(), "EDipole");

        assert_ne!(m[[PS_PY, PS_CHARGE]], 0.0);
        assert_eq!(m[[PS_PX, PS_CHARGE]], 0.0);
    }
}
