//! The NPU quantized unary elementwise operator.
use crate::internal::*;
use crate::ops::layout::{FeatureLayout, elementwise_output_shape};
use std::fmt;

pub const UNARY_ELEMENTWISE: &str = "npu.unary_elementwise";

const IFM_SLOT: usize = 0;
const RESULT_SLOT: usize = 2;

/// The unary operation to perform.
///
/// Only ABS maps to the current hardware; the enum leaves room for the
/// operations later revisions add.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Abs,
    Square,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOperator::Abs => write!(fmt, "ABS"),
            UnaryOperator::Square => write!(fmt, "SQUARE"),
        }
    }
}

/// Activation fused after the operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Activation {
    #[default]
    None,
    Clip,
    Tanh,
    Sigmoid,
    Lut,
}

/// Rounding applied to the output feature map.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// TensorFlow Lite rounding scheme.
    #[default]
    Tfl,
    /// Truncate towards zero.
    Truncate,
    /// Round to nearest, with x.5 towards +infinity.
    Natural,
}

/// Configuration snapshot for one unary elementwise node.
///
/// Built once at node construction and owned by the node for its whole
/// life. `clip_min`/`clip_max` only matter under [Activation::Clip]; the
/// pair is not checked for ordering.
#[derive(Clone, Debug, PartialEq, new)]
pub struct UnaryElementwiseAttrs {
    pub operator: UnaryOperator,
    pub ifm_scale: f64,
    pub ifm_zero_point: i32,
    pub ofm_scale: f64,
    pub ofm_zero_point: i32,
    pub ofm_channels: Dim,
    pub activation: Activation,
    pub clip_min: i32,
    pub clip_max: i32,
    pub rounding_mode: RoundingMode,
    pub ifm_layout: FeatureLayout,
    pub ofm_layout: FeatureLayout,
}

impl OpAttrs for UnaryElementwiseAttrs {}

/// Type inference rule for `npu.unary_elementwise`.
///
/// Cheap checks first (arity, operator kind, element type), then the
/// layout-aware shape derivation. The output always keeps the input
/// element type.
pub fn unary_elementwise_rel(
    types: &[InferenceFact],
    num_inputs: usize,
    attrs: &dyn OpAttrs,
    span: &Span,
) -> TypeInference {
    // a slot count mismatch is a wiring bug, not a user error
    assert_eq!(
        (num_inputs, types.len()),
        (2, RESULT_SLOT + 1),
        "{UNARY_ELEMENTWISE} expects 2 input slots and 1 result slot"
    );

    let Some(ifm) = types[IFM_SLOT].as_typed() else {
        return TypeInference::Pending;
    };
    let attrs = attrs
        .downcast_ref::<UnaryElementwiseAttrs>()
        .expect("npu.unary_elementwise invoked with a foreign attribute record");

    if attrs.operator != UnaryOperator::Abs {
        return TypeInference::Failed(Diagnostic::new(
            span.clone(),
            format!(
                "Invalid operator: expected {UNARY_ELEMENTWISE} ABS for operator but was {}",
                attrs.operator
            ),
        ));
    }

    if ifm.datum_type != DatumType::U8 && ifm.datum_type != DatumType::I8 {
        return TypeInference::Failed(Diagnostic::new(
            span.clone(),
            format!(
                "Invalid operator: expected {UNARY_ELEMENTWISE} input data type of U8 or I8 but was {}",
                ifm.datum_type
            ),
        ));
    }

    match elementwise_output_shape(&ifm.shape, attrs.ifm_layout, attrs.ofm_layout, &attrs.ofm_channels)
    {
        Ok(shape) => TypeInference::Resolved(TypedFact { datum_type: ifm.datum_type, shape }),
        Err(e) => TypeInference::Failed(Diagnostic::new(span.clone(), format!("{e:#}"))),
    }
}

/// Appends a unary elementwise call to the graph.
///
/// `lut` supplies the look-up table values and is only read by the
/// hardware when `activation` is [Activation::Lut]. Construction does not
/// type-check anything; that is the analyser's job.
#[allow(clippy::too_many_arguments)]
pub fn make_unary_elementwise(
    model: &mut Graph,
    name: &str,
    ifm: usize,
    lut: usize,
    operator: UnaryOperator,
    ifm_scale: f64,
    ifm_zero_point: i32,
    ofm_scale: f64,
    ofm_zero_point: i32,
    ofm_channels: impl ToDim,
    activation: Activation,
    clip_min: i32,
    clip_max: i32,
    rounding_mode: RoundingMode,
    ifm_layout: FeatureLayout,
    ofm_layout: FeatureLayout,
) -> BasaltResult<usize> {
    let attrs = UnaryElementwiseAttrs::new(
        operator,
        ifm_scale,
        ifm_zero_point,
        ofm_scale,
        ofm_zero_point,
        ofm_channels.to_dim(),
        activation,
        clip_min,
        clip_max,
        rounding_mode,
        ifm_layout,
        ofm_layout,
    );
    model.wire_node(name, UNARY_ELEMENTWISE, Box::new(attrs), &[ifm, lut])
}

pub fn register(reg: &mut OpRegistry) {
    reg.insert(
        OpSpec::new(UNARY_ELEMENTWISE, 2, unary_elementwise_rel)
            .with_doc(
                "Quantized unary elementwise operation. Accepts NHWC or NHCWB16 input \
                 feature maps: NHWC is (1, h, w, c), NHCWB16 is (1, h, c/16, w, 16). \
                 The output feature map is (1, h, w, ofm_channels).",
            )
            .with_argument("ifm", "The Input Feature Map tensor (IFM).")
            .with_argument("lut", "The look-up table values to use if activation = LUT.")
            .with_support_level(11),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs_attrs() -> UnaryElementwiseAttrs {
        UnaryElementwiseAttrs::new(
            UnaryOperator::Abs,
            1.0,
            0,
            1.0,
            0,
            16.to_dim(),
            Activation::None,
            0,
            0,
            RoundingMode::Tfl,
            FeatureLayout::Nhwc,
            FeatureLayout::Nhwc,
        )
    }

    fn span() -> Span {
        Span::new(2, "abs".to_string())
    }

    fn slots(ifm: InferenceFact) -> [InferenceFact; 3] {
        [ifm, InferenceFact::any(), InferenceFact::any()]
    }

    #[test]
    fn nhwc_uint8() {
        let types = slots(InferenceFact::dt_shape(DatumType::U8, [1, 4, 4, 16]));
        let outcome = unary_elementwise_rel(&types, 2, &abs_attrs(), &span());
        assert_eq!(
            outcome,
            TypeInference::Resolved(TypedFact::dt_shape(DatumType::U8, [1, 4, 4, 16]))
        );
    }

    #[test]
    fn element_type_is_preserved() {
        let types = slots(InferenceFact::dt_shape(DatumType::I8, [1, 4, 4, 16]));
        match unary_elementwise_rel(&types, 2, &abs_attrs(), &span()) {
            TypeInference::Resolved(fact) => assert_eq!(fact.datum_type, DatumType::I8),
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[test]
    fn nhcwb16_input_unpacks_to_nhwc() {
        let mut attrs = abs_attrs();
        attrs.ifm_layout = FeatureLayout::Nhcwb16;
        let types = slots(InferenceFact::dt_shape(DatumType::U8, [1, 4, 1, 4, 16]));
        let outcome = unary_elementwise_rel(&types, 2, &attrs, &span());
        assert_eq!(
            outcome,
            TypeInference::Resolved(TypedFact::dt_shape(DatumType::U8, [1, 4, 4, 16]))
        );
    }

    #[test]
    fn nhcwb16_output_is_bricked() {
        let mut attrs = abs_attrs();
        attrs.ofm_channels = 20.to_dim();
        attrs.ofm_layout = FeatureLayout::Nhcwb16;
        let types = slots(InferenceFact::dt_shape(DatumType::U8, [1, 4, 4, 20]));
        let outcome = unary_elementwise_rel(&types, 2, &attrs, &span());
        assert_eq!(
            outcome,
            TypeInference::Resolved(TypedFact::dt_shape(DatumType::U8, [1, 4, 2, 4, 16]))
        );
    }

    #[test]
    fn unsupported_operator_is_named() {
        let mut attrs = abs_attrs();
        attrs.operator = UnaryOperator::Square;
        let types = slots(InferenceFact::dt_shape(DatumType::U8, [1, 4, 4, 16]));
        match unary_elementwise_rel(&types, 2, &attrs, &span()) {
            TypeInference::Failed(diag) => assert!(diag.message.contains("SQUARE")),
            other => panic!("expected a diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn float_input_is_named() {
        let types = slots(InferenceFact::dt_shape(DatumType::F32, [1, 4, 4, 16]));
        match unary_elementwise_rel(&types, 2, &abs_attrs(), &span()) {
            TypeInference::Failed(diag) => assert!(diag.message.contains("F32")),
            other => panic!("expected a diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn unresolved_input_defers() {
        let types = slots(InferenceFact::any());
        assert_eq!(unary_elementwise_rel(&types, 2, &abs_attrs(), &span()), TypeInference::Pending);
    }

    #[test]
    fn inference_is_deterministic() {
        let types = slots(InferenceFact::dt_shape(DatumType::U8, [1, 4, 4, 16]));
        let first = unary_elementwise_rel(&types, 2, &abs_attrs(), &span());
        let second = unary_elementwise_rel(&types, 2, &abs_attrs(), &span());
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic]
    fn wrong_slot_count_aborts() {
        let types = [InferenceFact::any(), InferenceFact::any()];
        unary_elementwise_rel(&types, 2, &abs_attrs(), &span());
    }
}
