use num::traits::{FromPrimitive, ToPrimitive};

/// Identifies one of the sixteen general-purpose-and-convention registers.
///
/// Index assignment is fixed: `RI`=0, `RP`=1, `RB`=2, `RS`=3, `RF`=4, `RT`=5,
/// `RC`=6, `RA`=7, then `R1`..`R8` at 8..16.
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RegisterId {
    RI,
    RP,
    RB,
    RS,
    RF,
    RT,
    RC,
    RA,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
}

impl RegisterId {
    pub fn from_name(name: &str) -> Option<RegisterId> {
        use RegisterId::*;
        Some(match name {
            "RI" => RI,
            "RP" => RP,
            "RB" => RB,
            "RS" => RS,
            "RF" => RF,
            "RT" => RT,
            "RC" => RC,
            "RA" => RA,
            "R1" => R1,
            "R2" => R2,
            "R3" => R3,
            "R4" => R4,
            "R5" => R5,
            "R6" => R6,
            "R7" => R7,
            "R8" => R8,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        use RegisterId::*;
        match self {
            RI => "RI",
            RP => "RP",
            RB => "RB",
            RS => "RS",
            RF => "RF",
            RT => "RT",
            RC => "RC",
            RA => "RA",
            R1 => "R1",
            R2 => "R2",
            R3 => "R3",
            R4 => "R4",
            R5 => "R5",
            R6 => "R6",
            R7 => "R7",
            R8 => "R8",
        }
    }

    pub fn from_index(index: u8) -> Option<RegisterId> {
        FromPrimitive::from_u8(index)
    }
}

pub fn register_index(id: RegisterId) -> usize {
    ToPrimitive::to_u8(&id).unwrap() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_assignment_matches_table() {
        assert_eq!(register_index(RegisterId::RI), 0);
        assert_eq!(register_index(RegisterId::RP), 1);
        assert_eq!(register_index(RegisterId::RB), 2);
        assert_eq!(register_index(RegisterId::RS), 3);
        assert_eq!(register_index(RegisterId::RF), 4);
        assert_eq!(register_index(RegisterId::RT), 5);
        assert_eq!(register_index(RegisterId::RC), 6);
        assert_eq!(register_index(RegisterId::RA), 7);
        assert_eq!(register_index(RegisterId::R1), 8);
        assert_eq!(register_index(RegisterId::R8), 15);
    }

    #[test]
    fn name_round_trip() {
        for i in 0..16u8 {
            let id = RegisterId::from_index(i).unwrap();
            assert_eq!(RegisterId::from_name(id.name()), Some(id));
            assert_eq!(register_index(id), i as usize);
        }
    }
}
