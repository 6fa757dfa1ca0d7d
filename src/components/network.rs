use {
    crate::error::{
        Error,
        Result,
    },
    candle_core::{
        DType,
        Device,
        Module,
        Tensor,
        Var,
    },
    candle_nn::{
        func,
        linear,
        ops::sigmoid,
        sequential::seq,
        Activation,
        Sequential,
        VarBuilder,
        VarMap,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::{
        collections::BTreeMap,
        sync::PoisonError,
    },
};

fn poisoned<T>(e: PoisonError<T>) -> Error {
    Error::ParameterMismatch(format!("poisoned parameter lock: {e}"))
}

/// The transform applied to the output of the last linear layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputTransform {
    /// Raw linear output.
    Identity,
    /// `sigmoid(x) * (high - low) + low`, component-wise.
    ScaledSigmoid { low: f64, high: f64 },
}

/// The shape of a [`Network`].
///
/// # Fields
///
/// * `input_dim` - The size of the input vector.
/// * `hidden` - The sizes of the hidden layers, each followed by a ReLU.
/// * `output_dim` - The size of the output vector.
/// * `transform` - The output transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_dim: usize,
    pub hidden: Vec<usize>,
    pub output_dim: usize,
    pub transform: OutputTransform,
}
impl NetworkConfig {
    /// The `(in_dim, out_dim)` pair of every linear layer.
    pub fn dims(&self) -> Vec<(usize, usize)> {
        let mut sizes = vec![self.input_dim];
        sizes.extend(&self.hidden);
        sizes.push(self.output_dim);
        sizes.windows(2).map(|w| (w[0], w[1])).collect()
    }
}

/// A multilayer perceptron that owns its parameters.
///
/// Two networks built from the same [`NetworkConfig`] have the same
/// parameter names (`fc{i}.weight`, `fc{i}.bias`) and shapes, which is what
/// [`soft_update`] relies on.
pub struct Network {
    varmap: VarMap,
    model: Sequential,
    config: NetworkConfig,
}
impl Network {
    pub fn new(
        config: &NetworkConfig,
        device: &Device,
    ) -> Result<Self> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F64, device);

        let dims = config.dims();
        let mut model = seq();
        for (i, &(in_dim, out_dim)) in dims.iter().enumerate() {
            model = model.add(linear(in_dim, out_dim, vb.pp(format!("fc{i}")))?);
            if i + 1 < dims.len() {
                model = model.add(Activation::Relu);
            }
        }
        let model = match config.transform {
            OutputTransform::Identity => model,
            OutputTransform::ScaledSigmoid { low, high } => {
                model.add(func(move |xs| sigmoid(xs)?.affine(high - low, low)))
            }
        };

        Ok(Self {
            varmap,
            model,
            config: config.clone(),
        })
    }

    pub fn forward(
        &self,
        xs: &Tensor,
    ) -> Result<Tensor> {
        Ok(self.model.forward(xs)?)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// The trainable variables, for handing to an optimizer.
    pub fn vars(&self) -> Vec<Var> {
        self.varmap.all_vars()
    }

    /// A deep copy of every parameter tensor, keyed by name.
    ///
    /// Optimizer steps and soft updates write into the variables in place, so
    /// the copy is needed to compare parameters before and after.
    pub fn parameters(&self) -> Result<BTreeMap<String, Tensor>> {
        let data = self
            .varmap
            .data()
            .lock()
            .map_err(poisoned)?;
        data.iter()
            .map(|(name, var)| -> Result<(String, Tensor)> {
                Ok((name.clone(), var.as_tensor().copy()?))
            })
            .collect()
    }
}

/// Blend the parameters of `target` toward those of `local`.
///
/// target = tau * local + (1.0 - tau) * target
///
/// Parameters are matched by name. A name missing on either side or a shape
/// mismatch returns [`Error::ParameterMismatch`].
pub fn soft_update(
    local: &Network,
    target: &mut Network,
    tau: f64,
) -> Result<()> {
    if !(0.0..=1.0).contains(&tau) {
        return Err(Error::Config(format!("tau must lie in [0, 1], got {tau}")));
    }

    let src = local.varmap.data().lock().map_err(poisoned)?;
    let dest = target.varmap.data().lock().map_err(poisoned)?;

    if src.len() != dest.len() {
        return Err(Error::ParameterMismatch(format!(
            "local has {} parameter tensors, target has {}",
            src.len(),
            dest.len(),
        )));
    }

    // match every pair before writing so a mismatch leaves the target intact
    let pairs = dest
        .iter()
        .map(|(name, v_dest)| {
            let v_src = src
                .get(name)
                .ok_or_else(|| Error::ParameterMismatch(format!("{name} missing in local network")))?;
            if v_src.shape() != v_dest.shape() {
                return Err(Error::ParameterMismatch(format!(
                    "{name}: local {:?} vs target {:?}",
                    v_src.shape(),
                    v_dest.shape(),
                )));
            }
            Ok((v_src, v_dest))
        })
        .collect::<Result<Vec<_>>>()?;

    for (v_src, v_dest) in pairs {
        let t_src = v_src.as_tensor();
        let t_dest = v_dest.as_tensor();
        v_dest.set(&((tau * t_src)? + ((1.0 - tau) * t_dest)?)?)?;
    }
    Ok(())
}

/// The L2 distance between the parameters of two networks of equal shape.
pub fn parameter_distance(
    a: &Network,
    b: &Network,
) -> Result<f64> {
    let a = a.parameters()?;
    let b = b.parameters()?;
    let mut sum = 0.0;
    for (name, t_a) in a.iter() {
        let t_b = b
            .get(name)
            .ok_or_else(|| Error::ParameterMismatch(format!("{name} missing")))?;
        sum += (t_a - t_b)?.sqr()?.sum_all()?.to_scalar::<f64>()?;
    }
    Ok(sum.sqrt())
}
