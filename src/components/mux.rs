use crate::{
    error::Result,
    gate::Instance,
    library::{GateDef, Library},
};

pub const MUX: &str = "mux";

pub fn define_mux(library: &mut Library) -> Result<&GateDef> {
    library.define_composite(
        MUX,
        vec![
            Instance::new("or", [1, 2]).output(),
            Instance::new("and", [-1, 3]),
            Instance::new("and", [-2, -3]),
            Instance::new("not", [-3]),
        ],
    )
}
