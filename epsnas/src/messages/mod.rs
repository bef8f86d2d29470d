//! NAS-EPS message catalogues
//!
//! Each EMM (TS 24.301 8.2) and ESM (TS 24.301 8.3) message type maps to a
//! [`MessageBody`]: either a static, ordered element catalogue walked by
//! [`decode_elements`], or a custom decoder for messages whose shape depends
//! on more than the bytes themselves.
//!
//! - EMM messages - [`emm`]
//! - ESM messages - [`esm`]

pub mod emm;
pub mod esm;

use std::fmt;

use epsnas_common::OctetView;

use crate::codec::{decode_elements, DecodeContext, ElementSpec, Flow};
use crate::value::DecodedElement;

/// Decoder for a message body that cannot be described by one catalogue
pub type CustomFn = fn(&mut DecodeContext<'_>, &OctetView<'_>, &mut Vec<DecodedElement>) -> Flow;

/// How the body of a message (everything after the message type) is decoded
#[derive(Clone, Copy)]
pub enum MessageBody {
    Catalogue(&'static [ElementSpec]),
    Custom(CustomFn),
}

impl MessageBody {
    /// Decodes the body into `out`.
    pub fn decode(
        &self,
        ctx: &mut DecodeContext<'_>,
        view: &OctetView<'_>,
        out: &mut Vec<DecodedElement>,
    ) -> Flow {
        match self {
            MessageBody::Catalogue(catalogue) => decode_elements(ctx, view, catalogue, out),
            MessageBody::Custom(f) => f(ctx, view, out),
        }
    }
}

impl fmt::Debug for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageBody::Catalogue(catalogue) => write!(f, "Catalogue({} elements)", catalogue.len()),
            MessageBody::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Catalogue of messages without a body.
pub(crate) const EMPTY: &[ElementSpec] = &[];
