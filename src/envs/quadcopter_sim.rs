use {
    super::Simulator,
    auto_ops::impl_op_ex,
    std::f64::consts::PI,
};

/// A 3-vector for the simulator's kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3([f64; 3]);
impl Vec3 {
    pub fn zeros() -> Self {
        Self([0.0; 3])
    }

    /// Component-wise product.
    pub fn hadamard(
        &self,
        other: &Self,
    ) -> Self {
        Self([self[0] * other[0], self[1] * other[1], self[2] * other[2]])
    }

    pub fn map(
        &self,
        f: impl Fn(f64) -> f64,
    ) -> Self {
        Self([f(self[0]), f(self[1]), f(self[2])])
    }

    pub fn into_inner(self) -> [f64; 3] {
        self.0
    }
}
impl From<[f64; 3]> for Vec3 {
    fn from(value: [f64; 3]) -> Self {
        Self(value)
    }
}
impl std::ops::Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

// Vec3 + Vec3 AND reference types
impl_op_ex!(+ |a: &Vec3, b: &Vec3| -> Vec3 { Vec3([a[0] + b[0], a[1] + b[1], a[2] + b[2]]) });
// Vec3 - Vec3 AND reference types
impl_op_ex!(-|a: &Vec3, b: &Vec3| -> Vec3 { Vec3([a[0] - b[0], a[1] - b[1], a[2] - b[2]]) });
// Vec3 * f64 AND reference types
impl_op_ex!(*|a: &Vec3, s: &f64| -> Vec3 { a.map(|x| x * s) });
// f64 * Vec3 AND reference types
impl_op_ex!(*|s: &f64, a: &Vec3| -> Vec3 { a.map(|x| x * s) });
// Vec3 / Vec3 (component-wise) AND reference types
impl_op_ex!(/|a: &Vec3, b: &Vec3| -> Vec3 { Vec3([a[0] / b[0], a[1] / b[1], a[2] / b[2]]) });

/// Rotation matrix from the earth frame into the body frame for Euler
/// angles `(phi, theta, psi)`.
fn earth_to_body_frame(
    phi: f64,
    theta: f64,
    psi: f64,
) -> [[f64; 3]; 3] {
    let (si, ci) = phi.sin_cos();
    let (sj, cj) = theta.sin_cos();
    let (sk, ck) = psi.sin_cos();
    [
        [cj * ck, cj * sk, -sj],
        [si * sj * ck - ci * sk, si * sj * sk + ci * ck, si * cj],
        [ci * sj * ck + si * sk, ci * sj * sk - si * ck, ci * cj],
    ]
}

fn mat_vec(
    m: &[[f64; 3]; 3],
    v: &Vec3,
) -> Vec3 {
    Vec3([
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ])
}

fn mat_t_vec(
    m: &[[f64; 3]; 3],
    v: &Vec3,
) -> Vec3 {
    Vec3([
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2],
    ])
}

/// Rigid-body quadcopter model.
///
/// Thrust per rotor follows a propeller model driven by the advance ratio,
/// drag is quadratic in body-frame velocity, and the attitude is integrated
/// as Euler angles wrapped into `[0, 2*pi)`. Leaving the bounding box clips
/// the position onto the box and ends the episode, as does running past the
/// configured runtime.
#[derive(Debug, Clone)]
pub struct QuadcopterSim {
    init_pose: [f64; 6],
    init_velocities: Vec3,
    init_angle_velocities: Vec3,
    runtime: f64,

    time: f64,
    position: Vec3,
    angles: Vec3,
    v: Vec3,
    angular_v: Vec3,
    linear_accel: Vec3,
    angular_accels: Vec3,
    done: bool,

    areas: Vec3,
    dims: Vec3,
    moments_of_inertia: Vec3,
    lower_bounds: Vec3,
    upper_bounds: Vec3,
}
impl QuadcopterSim {
    pub const GRAVITY: f64 = -9.81;
    pub const RHO: f64 = 1.2;
    pub const MASS: f64 = 0.958;
    pub const DT: f64 = 1.0 / 50.0;
    pub const C_D: f64 = 0.3;
    pub const L_TO_ROTOR: f64 = 0.4;
    pub const PROPELLER_SIZE: f64 = 0.1;

    const WIDTH: f64 = 0.51;
    const LENGTH: f64 = 0.51;
    const HEIGHT: f64 = 0.235;
    const ENV_BOUNDS: f64 = 300.0;

    pub fn new(
        init_pose: [f64; 6],
        init_velocities: [f64; 3],
        init_angle_velocities: [f64; 3],
        runtime: f64,
    ) -> Self {
        let (w, l, h) = (Self::WIDTH, Self::LENGTH, Self::HEIGHT);
        let i_x = 1.0 / 12.0 * Self::MASS * (h * h + w * w);
        let i_y = 1.0 / 12.0 * Self::MASS * (h * h + l * l);
        let i_z = 1.0 / 12.0 * Self::MASS * (w * w + l * l);

        let mut sim = Self {
            init_pose,
            init_velocities: init_velocities.into(),
            init_angle_velocities: init_angle_velocities.into(),
            runtime,
            time: 0.0,
            position: Vec3::zeros(),
            angles: Vec3::zeros(),
            v: Vec3::zeros(),
            angular_v: Vec3::zeros(),
            linear_accel: Vec3::zeros(),
            angular_accels: Vec3::zeros(),
            done: false,
            areas: Vec3([l * h, w * h, w * l]),
            dims: Vec3([w, l, h]),
            moments_of_inertia: Vec3([i_x, i_y, i_z]),
            lower_bounds: Vec3([-Self::ENV_BOUNDS / 2.0, -Self::ENV_BOUNDS / 2.0, 0.0]),
            upper_bounds: Vec3([Self::ENV_BOUNDS / 2.0, Self::ENV_BOUNDS / 2.0, Self::ENV_BOUNDS]),
        };
        sim.reset();
        sim
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn linear_accel(&self) -> [f64; 3] {
        self.linear_accel.into_inner()
    }

    fn rotation(&self) -> [[f64; 3]; 3] {
        earth_to_body_frame(self.angles[0], self.angles[1], self.angles[2])
    }

    fn body_velocity(&self) -> Vec3 {
        mat_vec(&self.rotation(), &self.v)
    }

    fn linear_drag(&self) -> Vec3 {
        let body_v = self.body_velocity();
        0.5 * Self::RHO * body_v.hadamard(&body_v).hadamard(&self.areas) * Self::C_D
    }

    fn linear_forces(
        &self,
        thrusts: &[f64; 4],
    ) -> Vec3 {
        let gravity_force = Vec3([0.0, 0.0, Self::MASS * Self::GRAVITY]);
        let thrust_body_force = Vec3([0.0, 0.0, thrusts.iter().sum()]);
        let body_forces = thrust_body_force - self.linear_drag();
        mat_t_vec(&self.rotation(), &body_forces) + gravity_force
    }

    fn moments(
        &self,
        thrusts: &[f64; 4],
    ) -> Vec3 {
        let thrust_moment = Vec3([
            (thrusts[3] - thrusts[2]) * Self::L_TO_ROTOR,
            (thrusts[1] - thrusts[0]) * Self::L_TO_ROTOR,
            0.0,
        ]);
        let drag_moment = Self::C_D
            * 0.5
            * Self::RHO
            * self
                .angular_v
                .hadamard(&self.angular_v.map(f64::abs))
                .hadamard(&self.areas)
                .hadamard(&self.dims)
                .hadamard(&self.dims);
        thrust_moment - drag_moment
    }

    /// Thrust of each propeller for rotor speeds given in revolutions per
    /// second.
    fn propeller_thrust(
        &self,
        rotor_speeds: &[f64; 4],
    ) -> [f64; 4] {
        let body_v = self.body_velocity()[2];
        let d = Self::PROPELLER_SIZE;
        rotor_speeds.map(|n| {
            if n == 0.0 {
                return 0.0;
            }
            let j = (body_v / n / d).max(0.0);
            let c_t = (0.12 - 0.07 * j - 0.1 * j * j).max(0.0);
            c_t * Self::RHO * n * n * d.powi(4)
        })
    }
}

impl Simulator for QuadcopterSim {
    fn reset(&mut self) {
        self.time = 0.0;
        self.position = Vec3([self.init_pose[0], self.init_pose[1], self.init_pose[2]]);
        self.angles = Vec3([self.init_pose[3], self.init_pose[4], self.init_pose[5]]);
        self.v = self.init_velocities;
        self.angular_v = self.init_angle_velocities;
        self.linear_accel = Vec3::zeros();
        self.angular_accels = Vec3::zeros();
        self.done = false;
    }

    fn next_timestep(
        &mut self,
        rotor_speeds: &[f64; 4],
    ) -> bool {
        let dt = Self::DT;
        let thrusts = self.propeller_thrust(rotor_speeds);

        self.linear_accel = self.linear_forces(&thrusts) * (1.0 / Self::MASS);
        let position = self.position + self.v * dt + 0.5 * self.linear_accel * dt * dt;
        self.v = self.v + self.linear_accel * dt;

        self.angular_accels = self.moments(&thrusts) / self.moments_of_inertia;
        let angles = self.angles + self.angular_v * dt + 0.5 * self.angular_accels * dt * dt;
        self.angles = angles.map(|a| (a + 2.0 * PI).rem_euclid(2.0 * PI));
        self.angular_v = self.angular_v + self.angular_accels * dt;

        let mut clipped = position.into_inner();
        for (i, p) in clipped.iter_mut().enumerate() {
            if *p <= self.lower_bounds[i] {
                *p = self.lower_bounds[i];
                self.done = true;
            } else if *p > self.upper_bounds[i] {
                *p = self.upper_bounds[i];
                self.done = true;
            }
        }
        self.position = Vec3(clipped);

        self.time += dt;
        if self.time > self.runtime {
            self.done = true;
        }
        self.done
    }

    fn pose(&self) -> [f64; 6] {
        let (p, a) = (self.position, self.angles);
        [p[0], p[1], p[2], a[0], a[1], a[2]]
    }

    fn velocity(&self) -> [f64; 3] {
        self.v.into_inner()
    }

    fn angular_velocity(&self) -> [f64; 3] {
        self.angular_v.into_inner()
    }

    fn time(&self) -> f64 {
        self.time
    }
}
