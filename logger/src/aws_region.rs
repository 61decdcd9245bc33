/*
 * AWS region catalog
 *
 * The fixed set of region codes the CloudWatch logger can be bound to.
 * Global regions (aws-global, aws-cn-global, ...) are partition-wide
 * endpoints rather than geographic zones and are flagged as such.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::LoggerError;

macro_rules! aws_regions {
    ($($variant:ident => ($id:literal, $global:literal)),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum AwsRegion {
            $($variant),+
        }

        impl AwsRegion {
            pub const ALL: &'static [AwsRegion] = &[$(AwsRegion::$variant),+];

            /// The region code, e.g. `us-east-1`.
            pub fn id(&self) -> &'static str {
                match self {
                    $(AwsRegion::$variant => $id),+
                }
            }

            pub fn is_global(&self) -> bool {
                match self {
                    $(AwsRegion::$variant => $global),+
                }
            }
        }
    };
}

aws_regions! {
    ApSouth2 => ("ap-south-2", false),
    ApSouth1 => ("ap-south-1", false),
    EuSouth1 => ("eu-south-1", false),
    EuSouth2 => ("eu-south-2", false),
    UsGovEast1 => ("us-gov-east-1", false),
    MeCentral1 => ("me-central-1", false),
    CaCentral1 => ("ca-central-1", false),
    EuCentral1 => ("eu-central-1", false),
    UsIsoWest1 => ("us-iso-west-1", false),
    EuCentral2 => ("eu-central-2", false),
    UsWest1 => ("us-west-1", false),
    UsWest2 => ("us-west-2", false),
    AfSouth1 => ("af-south-1", false),
    EuNorth1 => ("eu-north-1", false),
    EuWest3 => ("eu-west-3", false),
    EuWest2 => ("eu-west-2", false),
    EuWest1 => ("eu-west-1", false),
    ApNortheast3 => ("ap-northeast-3", false),
    ApNortheast2 => ("ap-northeast-2", false),
    ApNortheast1 => ("ap-northeast-1", false),
    MeSouth1 => ("me-south-1", false),
    SaEast1 => ("sa-east-1", false),
    ApEast1 => ("ap-east-1", false),
    CnNorth1 => ("cn-north-1", false),
    UsGovWest1 => ("us-gov-west-1", false),
    ApSoutheast1 => ("ap-southeast-1", false),
    ApSoutheast2 => ("ap-southeast-2", false),
    UsIsoEast1 => ("us-iso-east-1", false),
    ApSoutheast3 => ("ap-southeast-3", false),
    ApSoutheast4 => ("ap-southeast-4", false),
    UsEast1 => ("us-east-1", false),
    UsEast2 => ("us-east-2", false),
    CnNorthwest1 => ("cn-northwest-1", false),
    UsIsobEast1 => ("us-isob-east-1", false),
    AwsGlobal => ("aws-global", true),
    AwsCnGlobal => ("aws-cn-global", true),
    AwsUsGovGlobal => ("aws-us-gov-global", true),
    AwsIsoGlobal => ("aws-iso-global", true),
    AwsIsoBGlobal => ("aws-iso-b-global", true),
}

impl AwsRegion {
    /// Looks a region up by its code, ignoring case.
    pub fn from_id(id: &str) -> Result<Self, LoggerError> {
        Self::ALL
            .iter()
            .copied()
            .find(|region| region.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| LoggerError::InvalidRegion(id.to_string()))
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AwsRegion {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

impl<'de> Deserialize<'de> for AwsRegion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_id(&s).map_err(serde::de::Error::custom)
    }
}
