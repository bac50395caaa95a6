// Time-of-day taxonomy ("franjas horarias") used by the charts.
//
// The table is a fixed, ordered list of closed intervals in minute-of-day
// resolution. A time is classified after dropping its seconds, so 08:00:59
// still belongs to the slot that ends at 08:00.
use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    Madrugada,
    Despertador,
    Manana,
    AccesoSobremesa,
    Sobremesa,
    Tarde,
    AccesoPrime,
    PrimeTime1,
    PrimeTime2,
}

impl TimeSlot {
    pub fn name(self) -> &'static str {
        match self {
            TimeSlot::Madrugada => "Madrugada",
            TimeSlot::Despertador => "Despertador",
            TimeSlot::Manana => "Mañana",
            TimeSlot::AccesoSobremesa => "Acceso sobremesa",
            TimeSlot::Sobremesa => "Sobremesa",
            TimeSlot::Tarde => "Tarde",
            TimeSlot::AccesoPrime => "Acceso prime",
            TimeSlot::PrimeTime1 => "Prime time 1",
            TimeSlot::PrimeTime2 => "Prime time 2",
        }
    }
}

/// Closed `[start, end]` interval, both ends in minutes since midnight.
#[derive(Debug, Clone, Copy)]
pub struct SlotInterval {
    pub slot: TimeSlot,
    pub start: u32,
    pub end: u32,
}

impl SlotInterval {
    pub fn contains(&self, minute: u32) -> bool {
        self.start <= minute && minute <= self.end
    }
}

const fn hm(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

const fn interval(slot: TimeSlot, start: u32, end: u32) -> SlotInterval {
    SlotInterval { slot, start, end }
}

/// Lookup order matters: the first matching interval wins.
pub static SLOT_TABLE: [SlotInterval; 9] = [
    interval(TimeSlot::Madrugada, hm(0, 0), hm(5, 59)),
    interval(TimeSlot::Despertador, hm(6, 0), hm(8, 0)),
    interval(TimeSlot::Manana, hm(8, 1), hm(12, 0)),
    interval(TimeSlot::AccesoSobremesa, hm(12, 1), hm(13, 0)),
    interval(TimeSlot::Sobremesa, hm(13, 1), hm(15, 0)),
    interval(TimeSlot::Tarde, hm(15, 1), hm(17, 59)),
    interval(TimeSlot::AccesoPrime, hm(18, 0), hm(19, 59)),
    interval(TimeSlot::PrimeTime1, hm(20, 0), hm(22, 0)),
    interval(TimeSlot::PrimeTime2, hm(22, 1), hm(23, 59)),
];

/// Result of classifying a (possibly absent) start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotLabel {
    Slot(TimeSlot),
    /// No start time to classify.
    NoTime,
    /// A time outside every interval.
    Unmatched,
}

impl SlotLabel {
    pub fn label(self) -> &'static str {
        match self {
            SlotLabel::Slot(slot) => slot.name(),
            SlotLabel::NoTime => "Sin franja",
            SlotLabel::Unmatched => "Sin slot",
        }
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SlotLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

pub fn slot_for_minute(minute: u32) -> Option<TimeSlot> {
    SLOT_TABLE
        .iter()
        .find(|interval| interval.contains(minute))
        .map(|interval| interval.slot)
}

pub fn classify(time: Option<NaiveTime>) -> SlotLabel {
    let Some(time) = time else {
        return SlotLabel::NoTime;
    };
    match slot_for_minute(hm(time.hour(), time.minute())) {
        Some(slot) => SlotLabel::Slot(slot),
        None => SlotLabel::Unmatched,
    }
}
